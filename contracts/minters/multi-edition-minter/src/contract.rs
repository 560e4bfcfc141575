use std::collections::BTreeMap;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Empty, Env,
    MessageInfo, Order, Reply, Response, StdError, StdResult, SubMsg, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw_utils::{must_pay, nonpayable, parse_reply_instantiate_data};

use allowlist::verify_proof;
use lifecycle::LifecycleState;
use mint_ledger::{LedgerError, MintLedger};
use sale_types::{
    MintCountResponse, SaleConfig, SalePhase, SalePhaseResponse, TokenUriResponse,
    TotalMintedResponse,
};

use crate::error::ContractError;
use crate::msg::{EditionResponse, ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{EditionSupply, ALLOWLIST_ROOT, CONFIG, EDITIONS, TOKEN_CONTRACT};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:multi-edition-minter";
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
    if msg.whitelist_mint_limit == 0 || msg.public_mint_limit == 0 {
        return Err(ContractError::PerAddressLimitZero {});
    }
    if msg.unit_price.amount.is_zero() {
        return Err(ContractError::InvalidUnitPrice {});
    }

    let payment_collector = msg
        .payment_collector
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?
        .unwrap_or(info.sender.clone());

    let config = SaleConfig {
        owner: info.sender.clone(),
        payment_collector,
        unit_price: msg.unit_price,
        max_supply: msg.max_supply,
        whitelist_mint_limit: msg.whitelist_mint_limit,
        public_mint_limit: msg.public_mint_limit,
        mint_active: false,
        whitelist_only: true,
    };
    CONFIG.save(deps.storage, &config)?;
    ALLOWLIST_ROOT.save(deps.storage, &msg.allowlist_root)?;

    for edition in msg.editions {
        EDITIONS.save(
            deps.storage,
            edition.edition_id,
            &EditionSupply {
                minted: 0,
                max_supply: edition.max_supply,
            },
        )?;
    }

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
        ExecuteMsg::Mint {
            edition_id,
            quantity,
            proof,
        } => execute_mint(deps, env, info, edition_id, quantity, proof),
        ExecuteMsg::Airdrop {
            recipients,
            edition_ids,
            quantities,
        } => execute_airdrop(deps, env, info, recipients, edition_ids, quantities),
        ExecuteMsg::ToggleMinting {} => execute_toggle_minting(deps, env, info),
        ExecuteMsg::ToggleWhitelistOnly {} => execute_toggle_whitelist_only(deps, env, info),
        ExecuteMsg::SetEditionSupply {
            edition_id,
            max_supply,
        } => execute_set_edition_supply(deps, env, info, edition_id, max_supply),
        ExecuteMsg::SetUnitPrice { price } => execute_set_unit_price(deps, env, info, price),
        ExecuteMsg::Reveal { base_uri } => execute_reveal(deps, env, info, base_uri),
        ExecuteMsg::SealContractPermanently {} => execute_seal(deps, env, info),
    }
}

pub fn execute_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    edition_id: u32,
    quantity: u32,
    proof: Vec<String>,
) -> Result<Response, ContractError> {
    if quantity == 0 {
        return Err(ContractError::ZeroQuantity {});
    }
    let config = CONFIG.load(deps.storage)?;
    let phase = config.phase();
    if phase == SalePhase::Disabled {
        return Err(ContractError::MintingDisabled {});
    }
    if phase == SalePhase::WhitelistOnly {
        let root = ALLOWLIST_ROOT.load(deps.storage)?;
        if !verify_proof(&proof, info.sender.as_str(), &root) {
            return Err(ContractError::NotWhitelisted {});
        }
    }

    let expected = config
        .unit_price
        .amount
        .checked_mul(Uint128::from(quantity))
        .map_err(StdError::overflow)?;
    let sent = must_pay(&info, &config.unit_price.denom)?;
    if sent != expected {
        return Err(ContractError::InvalidValueProvided { expected, sent });
    }

    // Only editions the owner has opened can be minted
    let mut edition = EDITIONS
        .may_load(deps.storage, edition_id)?
        .ok_or(ContractError::InvalidToken {})?;
    if edition
        .minted
        .checked_add(quantity)
        .map_or(true, |n| n > edition.max_supply)
    {
        return Err(ContractError::Ledger(LedgerError::NoMoreTokensLeft {}));
    }

    let ledger = MintLedger::new();
    ledger.assert_supply(deps.storage, quantity, config.max_supply)?;
    // Quota is shared across all edition ids
    ledger.assert_quota(
        deps.storage,
        &info.sender,
        quantity,
        config.phase_limit(phase),
    )?;

    let token_contract = TOKEN_CONTRACT
        .may_load(deps.storage)?
        .ok_or(ContractError::TokenContractNotSet {})?;

    let first_token_id = ledger.total_minted(deps.storage)? + 1;
    edition.minted += quantity;
    EDITIONS.save(deps.storage, edition_id, &edition)?;
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
        .add_attribute("action", "mint")
        .add_attribute("recipient", info.sender)
        .add_attribute("edition_id", edition_id.to_string())
        .add_attribute("quantity", quantity.to_string());
    Ok(res)
}

pub fn execute_airdrop(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipients: Vec<String>,
    edition_ids: Vec<u32>,
    quantities: Vec<u32>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    if recipients.len() != quantities.len() || recipients.len() != edition_ids.len() {
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

    // Validate the whole batch before the first write: per-edition caps
    // and the global cap must hold for the batch as one unit
    let mut editions: BTreeMap<u32, EditionSupply> = BTreeMap::new();
    for (edition_id, quantity) in edition_ids.iter().zip(quantities.iter()) {
        let mut edition = match editions.remove(edition_id) {
            Some(edition) => edition,
            None => EDITIONS
                .may_load(deps.storage, *edition_id)?
                .ok_or(ContractError::InvalidToken {})?,
        };
        if edition
            .minted
            .checked_add(*quantity)
            .map_or(true, |n| n > edition.max_supply)
        {
            return Err(ContractError::Ledger(LedgerError::NoMoreTokensLeft {}));
        }
        edition.minted += *quantity;
        editions.insert(*edition_id, edition);
    }

    let ledger = MintLedger::new();
    ledger.assert_supply(deps.storage, batch_total, config.max_supply)?;

    let token_contract = TOKEN_CONTRACT
        .may_load(deps.storage)?
        .ok_or(ContractError::TokenContractNotSet {})?;

    let mut next_token_id = ledger.total_minted(deps.storage)? + 1;
    for (edition_id, edition) in &editions {
        EDITIONS.save(deps.storage, *edition_id, edition)?;
    }
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
    assert_owner(&config, &info.sender)?;

    config.mint_active = !config.mint_active;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "toggle_minting")
        .add_attribute("mint_active", config.mint_active.to_string());
    Ok(res)
}

pub fn execute_toggle_whitelist_only(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    config.whitelist_only = !config.whitelist_only;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "toggle_whitelist_only")
        .add_attribute("whitelist_only", config.whitelist_only.to_string());
    Ok(res)
}

pub fn execute_set_edition_supply(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    edition_id: u32,
    max_supply: u32,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let mut edition = EDITIONS
        .may_load(deps.storage, edition_id)?
        .unwrap_or(EditionSupply {
            minted: 0,
            max_supply: 0,
        });
    // Already issued units can never be capped away
    if max_supply < edition.minted {
        return Err(ContractError::InvalidEditionSupply {});
    }
    edition.max_supply = max_supply;
    EDITIONS.save(deps.storage, edition_id, &edition)?;

    let res = Response::new()
        .add_attribute("action", "set_edition_supply")
        .add_attribute("edition_id", edition_id.to_string())
        .add_attribute("max_supply", max_supply.to_string());
    Ok(res)
}

pub fn execute_set_unit_price(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    price: Coin,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    if price.amount.is_zero() {
        return Err(ContractError::InvalidUnitPrice {});
    }
    config.unit_price = price.clone();
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "set_unit_price")
        .add_attribute("unit_price", price.to_string());
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
    assert_owner(&config, &info.sender)?;

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
    assert_owner(&config, &info.sender)?;

    LifecycleState::new().seal(deps.storage)?;

    let res = Response::new().add_attribute("action", "seal_contract_permanently");
    Ok(res)
}

fn assert_owner(config: &SaleConfig, sender: &Addr) -> Result<(), ContractError> {
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {});
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
        QueryMsg::SalePhase {} => to_json_binary(&query_sale_phase(deps, env)?),
        QueryMsg::TotalMinted {} => to_json_binary(&query_total_minted(deps, env)?),
        QueryMsg::MintCount { address } => to_json_binary(&query_mint_count(deps, env, address)?),
        QueryMsg::Edition { edition_id } => to_json_binary(&query_edition(deps, env, edition_id)?),
        QueryMsg::Editions {} => to_json_binary(&query_editions(deps, env)?),
        QueryMsg::AllowlistRoot {} => to_json_binary(&ALLOWLIST_ROOT.load(deps.storage)?),
        QueryMsg::TokenContract {} => to_json_binary(&TOKEN_CONTRACT.load(deps.storage)?),
        QueryMsg::IsSealed {} => to_json_binary(&query_is_sealed(deps, env)?),
        QueryMsg::TokenUri { edition_id } => {
            to_json_binary(&query_token_uri(deps, env, edition_id)?)
        }
    }
}

fn query_config(deps: Deps, _env: Env) -> Result<SaleConfig, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config)
}

fn query_sale_phase(deps: Deps, _env: Env) -> Result<SalePhaseResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(SalePhaseResponse {
        phase: config.phase(),
    })
}

fn query_total_minted(deps: Deps, _env: Env) -> Result<TotalMintedResponse, ContractError> {
    let total_minted = MintLedger::new().total_minted(deps.storage)?;
    Ok(TotalMintedResponse { total_minted })
}

fn query_mint_count(deps: Deps, _env: Env, address: String) -> Result<MintCountResponse, ContractError> {
    let address = deps.api.addr_validate(&address)?;
    let count = MintLedger::new().minted_by(deps.storage, &address)?;
    Ok(MintCountResponse { address, count })
}

fn query_edition(deps: Deps, _env: Env, edition_id: u32) -> Result<EditionResponse, ContractError> {
    let supply = EDITIONS
        .may_load(deps.storage, edition_id)?
        .ok_or(ContractError::InvalidToken {})?;
    Ok(EditionResponse { edition_id, supply })
}

fn query_editions(deps: Deps, _env: Env) -> Result<Vec<EditionResponse>, ContractError> {
    let editions = EDITIONS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (edition_id, supply) = item?;
            Ok(EditionResponse { edition_id, supply })
        })
        .collect::<StdResult<Vec<EditionResponse>>>()?;
    Ok(editions)
}

fn query_is_sealed(deps: Deps, _env: Env) -> Result<bool, ContractError> {
    let is_sealed = LifecycleState::new().is_sealed(deps.storage)?;
    Ok(is_sealed)
}

/// Metadata location for an edition. Editions with no minted units are
/// not exposed.
fn query_token_uri(deps: Deps, _env: Env, edition_id: u32) -> Result<TokenUriResponse, ContractError> {
    let edition = EDITIONS.may_load(deps.storage, edition_id)?;
    match edition {
        Some(edition) if edition.minted > 0 => {
            let token_uri =
                LifecycleState::new().token_uri(deps.storage, &edition_id.to_string())?;
            Ok(TokenUriResponse { token_uri })
        }
        _ => Err(ContractError::NonexistentToken {}),
    }
}
