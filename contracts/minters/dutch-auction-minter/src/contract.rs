#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Empty, Env,
    MessageInfo, Reply, Response, StdError, StdResult, SubMsg, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw_utils::{must_pay, nonpayable, parse_reply_instantiate_data};

use lifecycle::LifecycleState;
use mint_ledger::{LedgerError, MintLedger};
use sale_types::{MintCountResponse, TokenUriResponse, TotalMintedResponse};

use crate::auction::AuctionSchedule;
use crate::error::ContractError;
use crate::msg::{AuctionMintedResponse, CurrentPriceResponse, ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{AuctionSaleConfig, AUCTION_MINTED, AUCTION_SCHEDULE, CONFIG, TOKEN_CONTRACT};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:dutch-auction-minter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const INSTANTIATE_TOKEN_REPLY_ID: u64 = 1;

pub type Cw721ExecuteMsg = cw721_base::ExecuteMsg<cw721_base::Extension, Empty>;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.max_supply == 0 {
        return Err(ContractError::ZeroMaxSupply {});
    }
    if msg.auction_supply == 0 || msg.auction_supply > msg.max_supply {
        return Err(ContractError::InvalidAuctionSupply {});
    }
    if msg.token_mint_limit == 0 {
        return Err(ContractError::MintLimitZero {});
    }
    if msg.public_price.amount.is_zero() {
        return Err(ContractError::InvalidUnitPrice {});
    }
    msg.auction_schedule.validate()?;

    let payment_collector = msg
        .payment_collector
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?
        .unwrap_or(info.sender.clone());

    // Public minting starts disabled; the auction needs no flag, only
    // its start time
    let config = AuctionSaleConfig {
        owner: info.sender.clone(),
        payment_collector,
        public_price: msg.public_price,
        max_supply: msg.max_supply,
        auction_supply: msg.auction_supply,
        token_mint_limit: msg.token_mint_limit,
        mint_active: false,
    };
    CONFIG.save(deps.storage, &config)?;
    AUCTION_SCHEDULE.save(deps.storage, &msg.auction_schedule)?;
    AUCTION_MINTED.save(deps.storage, &0)?;

    MintLedger::new().initialize(deps.storage)?;
    LifecycleState::new().initialize(deps.storage, &msg.base_uri)?;

    let token_init_msg = WasmMsg::Instantiate {
        admin: Some(info.sender.into_string()),
        code_id: msg.cw721_code_id,
        msg: to_json_binary(&cw721_base::InstantiateMsg {
            name: msg.name.clone(),
            symbol: msg.symbol,
            minter: env.contract.address.into_string(),
        })?,
        funds: vec![],
        label: format!("{} token ledger", msg.name),
    };

    let res = Response::new()
        .add_submessage(SubMsg::reply_on_success(
            token_init_msg,
            INSTANTIATE_TOKEN_REPLY_ID,
        ))
        .add_attribute("action", "instantiate");

    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != INSTANTIATE_TOKEN_REPLY_ID {
        return Err(ContractError::UnknownReplyId { id: msg.id });
    }
    if TOKEN_CONTRACT.may_load(deps.storage)?.is_some() {
        return Err(ContractError::TokenContractAlreadySet {});
    }
    let reply_data = parse_reply_instantiate_data(msg)?;
    let token_contract = deps.api.addr_validate(&reply_data.contract_address)?;
    TOKEN_CONTRACT.save(deps.storage, &token_contract)?;

    let res = Response::new()
        .add_attribute("action", "register_token_contract")
        .add_attribute("token_contract", token_contract);
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AuctionMint { quantity } => execute_auction_mint(deps, env, info, quantity),
        ExecuteMsg::PublicMint { quantity } => execute_public_mint(deps, env, info, quantity),
        ExecuteMsg::Airdrop {
            recipients,
            quantities,
        } => execute_airdrop(deps, env, info, recipients, quantities),
        ExecuteMsg::ToggleMinting {} => execute_toggle_minting(deps, env, info),
        ExecuteMsg::Reveal { base_uri } => execute_reveal(deps, env, info, base_uri),
        ExecuteMsg::SealContractPermanently {} => execute_seal(deps, env, info),
    }
}

pub fn execute_auction_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    quantity: u32,
) -> Result<Response, ContractError> {
    if quantity == 0 {
        return Err(ContractError::ZeroQuantity {});
    }
    let config = CONFIG.load(deps.storage)?;
    let schedule = AUCTION_SCHEDULE.load(deps.storage)?;

    if env.block.time < schedule.start_time {
        return Err(ContractError::AuctionNotStarted {});
    }

    // The auction price is a pure function of the block time, read at
    // call time and never locked in advance
    let unit_price = schedule.current_price(env.block.time);
    assert_exact_payment(&info, unit_price, &config.public_price.denom, quantity)?;

    // The auction sub-supply is checked in addition to the global cap
    let auction_minted = AUCTION_MINTED.load(deps.storage)?;
    if auction_minted
        .checked_add(quantity)
        .map_or(true, |n| n > config.auction_supply)
    {
        return Err(ContractError::Ledger(LedgerError::NoMoreTokensLeft {}));
    }

    let ledger = MintLedger::new();
    ledger.assert_supply(deps.storage, quantity, config.max_supply)?;
    ledger.assert_quota(
        deps.storage,
        &info.sender,
        quantity,
        config.token_mint_limit,
    )?;

    let token_contract = TOKEN_CONTRACT
        .may_load(deps.storage)?
        .ok_or(ContractError::TokenContractNotSet {})?;

    let first_token_id = ledger.total_minted(deps.storage)? + 1;
    AUCTION_MINTED.save(deps.storage, &(auction_minted + quantity))?;
    ledger.commit_mint(deps.storage, &info.sender, quantity)?;

    let mint_msgs = token_mint_msgs(&token_contract, &info.sender, first_token_id, quantity)?;
    let forward_payment: CosmosMsg = BankMsg::Send {
        to_address: config.payment_collector.into_string(),
        amount: info.funds.clone(),
    }
    .into();

    let res = Response::new()
        .add_messages(mint_msgs)
        .add_message(forward_payment)
        .add_attribute("action", "auction_mint")
        .add_attribute("recipient", info.sender)
        .add_attribute("quantity", quantity.to_string())
        .add_attribute("unit_price", unit_price);
    Ok(res)
}

pub fn execute_public_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    quantity: u32,
) -> Result<Response, ContractError> {
    if quantity == 0 {
        return Err(ContractError::ZeroQuantity {});
    }
    let config = CONFIG.load(deps.storage)?;
    if !config.mint_active {
        return Err(ContractError::MintingDisabled {});
    }

    assert_exact_payment(
        &info,
        config.public_price.amount,
        &config.public_price.denom,
        quantity,
    )?;

    // Auction and public mints draw from one shared per-address quota
    let ledger = MintLedger::new();
    ledger.assert_supply(deps.storage, quantity, config.max_supply)?;
    ledger.assert_quota(
        deps.storage,
        &info.sender,
        quantity,
        config.token_mint_limit,
    )?;

    let token_contract = TOKEN_CONTRACT
        .may_load(deps.storage)?
        .ok_or(ContractError::TokenContractNotSet {})?;

    let first_token_id = ledger.total_minted(deps.storage)? + 1;
    ledger.commit_mint(deps.storage, &info.sender, quantity)?;

    let mint_msgs = token_mint_msgs(&token_contract, &info.sender, first_token_id, quantity)?;
    let forward_payment: CosmosMsg = BankMsg::Send {
        to_address: config.payment_collector.into_string(),
        amount: info.funds.clone(),
    }
    .into();

    let res = Response::new()
        .add_messages(mint_msgs)
        .add_message(forward_payment)
        .add_attribute("action", "public_mint")
        .add_attribute("recipient", info.sender)
        .add_attribute("quantity", quantity.to_string());
    Ok(res)
}

pub fn execute_airdrop(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipients: Vec<String>,
    quantities: Vec<u32>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_owner(config.owner.as_ref(), &info.sender)?;

    if recipients.len() != quantities.len() {
        return Err(ContractError::MismatchedAirdropInput {});
    }
    let recipients = recipients
        .iter()
        .map(|addr| deps.api.addr_validate(addr))
        .collect::<StdResult<Vec<Addr>>>()?;
    let batch_total = quantities
        .iter()
        .try_fold(0u32, |acc, quantity| acc.checked_add(*quantity))
        .ok_or(ContractError::Ledger(LedgerError::NoMoreTokensLeft {}))?;

    // Airdrops bypass phase, payment and quota gates but never the supply cap
    let ledger = MintLedger::new();
    ledger.assert_supply(deps.storage, batch_total, config.max_supply)?;

    let token_contract = TOKEN_CONTRACT
        .may_load(deps.storage)?
        .ok_or(ContractError::TokenContractNotSet {})?;

    let mut next_token_id = ledger.total_minted(deps.storage)? + 1;
    ledger.commit_airdrop(deps.storage, batch_total)?;

    let mut mint_msgs: Vec<CosmosMsg> = Vec::new();
    for (recipient, quantity) in recipients.iter().zip(quantities.iter()) {
        mint_msgs.extend(token_mint_msgs(
            &token_contract,
            recipient,
            next_token_id,
            *quantity,
        )?);
        next_token_id += quantity;
    }

    let res = Response::new()
        .add_messages(mint_msgs)
        .add_attribute("action", "airdrop")
        .add_attribute("quantity", batch_total.to_string());
    Ok(res)
}

pub fn execute_toggle_minting(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(config.owner.as_ref(), &info.sender)?;

    config.mint_active = !config.mint_active;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "toggle_minting")
        .add_attribute("mint_active", config.mint_active.to_string());
    Ok(res)
}

pub fn execute_reveal(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    base_uri: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_owner(config.owner.as_ref(), &info.sender)?;

    LifecycleState::new().reveal(deps.storage, &base_uri)?;

    let res = Response::new()
        .add_attribute("action", "reveal")
        .add_attribute("base_uri", base_uri);
    Ok(res)
}

pub fn execute_seal(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_owner(config.owner.as_ref(), &info.sender)?;

    LifecycleState::new().seal(deps.storage)?;

    let res = Response::new().add_attribute("action", "seal_contract_permanently");
    Ok(res)
}

fn assert_owner(owner: &str, sender: &Addr) -> Result<(), ContractError> {
    if sender.as_str() != owner {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

fn assert_exact_payment(
    info: &MessageInfo,
    unit_price: Uint128,
    denom: &str,
    quantity: u32,
) -> Result<(), ContractError> {
    let expected = unit_price
        .checked_mul(Uint128::from(quantity))
        .map_err(StdError::overflow)?;
    let sent = must_pay(info, denom)?;
    if sent != expected {
        return Err(ContractError::InvalidValue { expected, sent });
    }
    Ok(())
}

fn token_mint_msgs(
    token_contract: &Addr,
    recipient: &Addr,
    first_token_id: u32,
    quantity: u32,
) -> Result<Vec<CosmosMsg>, ContractError> {
    let mut msgs: Vec<CosmosMsg> = Vec::with_capacity(quantity as usize);
    for token_id in first_token_id..first_token_id + quantity {
        msgs.push(
            WasmMsg::Execute {
                contract_addr: token_contract.to_string(),
                msg: to_json_binary(&Cw721ExecuteMsg::Mint {
                    token_id: token_id.to_string(),
                    owner: recipient.to_string(),
                    token_uri: None,
                    extension: None,
                })?,
                funds: vec![],
            }
            .into(),
        );
    }
    Ok(msgs)
}

// Implement Queries
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps, env)?),
        QueryMsg::AuctionSchedule {} => to_json_binary(&query_auction_schedule(deps, env)?),
        QueryMsg::CurrentPrice {} => to_json_binary(&query_current_price(deps, env)?),
        QueryMsg::TotalMinted {} => to_json_binary(&query_total_minted(deps, env)?),
        QueryMsg::AuctionMinted {} => to_json_binary(&query_auction_minted(deps, env)?),
        QueryMsg::MintCount { address } => to_json_binary(&query_mint_count(deps, env, address)?),
        QueryMsg::TokenContract {} => to_json_binary(&TOKEN_CONTRACT.load(deps.storage)?),
        QueryMsg::IsSealed {} => to_json_binary(&query_is_sealed(deps, env)?),
        QueryMsg::TokenUri { token_id } => to_json_binary(&query_token_uri(deps, env, token_id)?),
    }
}

fn query_config(deps: Deps, _env: Env) -> Result<AuctionSaleConfig, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config)
}

fn query_auction_schedule(deps: Deps, _env: Env) -> Result<AuctionSchedule, ContractError> {
    let schedule = AUCTION_SCHEDULE.load(deps.storage)?;
    Ok(schedule)
}

fn query_current_price(deps: Deps, env: Env) -> Result<CurrentPriceResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let schedule = AUCTION_SCHEDULE.load(deps.storage)?;
    let price = schedule.current_price(env.block.time);
    Ok(CurrentPriceResponse {
        price: Coin {
            denom: config.public_price.denom,
            amount: price,
        },
    })
}

fn query_total_minted(deps: Deps, _env: Env) -> Result<TotalMintedResponse, ContractError> {
    let total_minted = MintLedger::new().total_minted(deps.storage)?;
    Ok(TotalMintedResponse { total_minted })
}

fn query_auction_minted(deps: Deps, _env: Env) -> Result<AuctionMintedResponse, ContractError> {
    let auction_minted = AUCTION_MINTED.load(deps.storage)?;
    Ok(AuctionMintedResponse { auction_minted })
}

fn query_mint_count(deps: Deps, _env: Env, address: String) -> Result<MintCountResponse, ContractError> {
    let address = deps.api.addr_validate(&address)?;
    let count = MintLedger::new().minted_by(deps.storage, &address)?;
    Ok(MintCountResponse { address, count })
}

fn query_is_sealed(deps: Deps, _env: Env) -> Result<bool, ContractError> {
    let is_sealed = LifecycleState::new().is_sealed(deps.storage)?;
    Ok(is_sealed)
}

fn query_token_uri(deps: Deps, _env: Env, token_id: u32) -> Result<TokenUriResponse, ContractError> {
    let total_minted = MintLedger::new().total_minted(deps.storage)?;
    if token_id == 0 || token_id > total_minted {
        return Err(ContractError::Std(StdError::generic_err(
            "token is not minted",
        )));
    }
    let token_uri = LifecycleState::new().token_uri(deps.storage, &token_id.to_string())?;
    Ok(TokenUriResponse { token_uri })
}
