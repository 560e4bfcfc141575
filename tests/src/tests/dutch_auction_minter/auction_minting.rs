use cosmwasm_std::{coin, Uint128};
use cw_multi_test::Executor;

use dutch_auction_minter::error::ContractError;
use dutch_auction_minter::msg::{AuctionMintedResponse, CurrentPriceResponse, ExecuteMsg, QueryMsg};
use mint_ledger::LedgerError;
use sale_types::{MintCountResponse, TotalMintedResponse};

use crate::helpers::mock_messages::{
    return_dutch_auction_inst_msg, AUCTION_DROP_INTERVAL, AUCTION_DROP_PER_STEP,
    AUCTION_END_PRICE, AUCTION_START_PRICE, DENOM, UNIT_PRICE,
};
use crate::helpers::setup::setup;

#[test]
fn dutch_auction_minting() {
    let res = setup();
    let owner = res.test_accounts.owner;
    let buyer = res.test_accounts.buyer;
    let second_buyer = res.test_accounts.second_buyer;
    let outsider = res.test_accounts.outsider;
    let cw721_code_id = res.cw721_code_id;
    let dutch_auction_minter_code_id = res.dutch_auction_minter_code_id;
    let mut app = res.app;

    let start_time = app.block_info().time.plus_seconds(1_000);
    let inst_msg = return_dutch_auction_inst_msg(cw721_code_id, start_time);
    let minter_address = app
        .instantiate_contract(
            dutch_auction_minter_code_id,
            owner.clone(),
            &inst_msg,
            &[],
            "dutch-auction-minter",
            None,
        )
        .unwrap();

    // The auction needs no flag, just its start time
    let err = app
        .execute_contract(
            buyer.clone(),
            minter_address.clone(),
            &ExecuteMsg::AuctionMint { quantity: 1 },
            &[coin(AUCTION_START_PRICE, DENOM)],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::AuctionNotStarted {});

    app.update_block(|block| {
        block.time = block.time.plus_seconds(1_000);
        block.height += 1;
    });

    let price: CurrentPriceResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::CurrentPrice {})
        .unwrap();
    assert_eq!(price.price.amount, Uint128::new(AUCTION_START_PRICE));

    // The block time price is binding, the old public price is not accepted
    let err = app
        .execute_contract(
            buyer.clone(),
            minter_address.clone(),
            &ExecuteMsg::AuctionMint { quantity: 1 },
            &[coin(UNIT_PRICE, DENOM)],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(
        err,
        &ContractError::InvalidValue {
            expected: Uint128::new(AUCTION_START_PRICE),
            sent: Uint128::new(UNIT_PRICE),
        }
    );

    app.execute_contract(
        buyer.clone(),
        minter_address.clone(),
        &ExecuteMsg::AuctionMint { quantity: 1 },
        &[coin(AUCTION_START_PRICE, DENOM)],
    )
    .unwrap();

    // Three intervals in the price has dropped three steps
    app.update_block(|block| {
        block.time = block.time.plus_seconds(3 * AUCTION_DROP_INTERVAL);
        block.height += 1;
    });
    let expected_price = AUCTION_START_PRICE - 3 * AUCTION_DROP_PER_STEP;
    let price: CurrentPriceResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::CurrentPrice {})
        .unwrap();
    assert_eq!(price.price.amount, Uint128::new(expected_price));

    app.execute_contract(
        buyer.clone(),
        minter_address.clone(),
        &ExecuteMsg::AuctionMint { quantity: 2 },
        &[coin(expected_price * 2, DENOM)],
    )
    .unwrap();

    let count: MintCountResponse = app
        .wrap()
        .query_wasm_smart(
            minter_address.clone(),
            &QueryMsg::MintCount {
                address: buyer.to_string(),
            },
        )
        .unwrap();
    assert_eq!(count.count, 3);

    // The per-address limit is three
    let err = app
        .execute_contract(
            buyer.clone(),
            minter_address.clone(),
            &ExecuteMsg::AuctionMint { quantity: 1 },
            &[coin(expected_price, DENOM)],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(
        err,
        &ContractError::Ledger(LedgerError::MintLimitReached {})
    );

    // Once the curve has run out the price floors at the end price
    app.update_block(|block| {
        block.time = block.time.plus_seconds(10_000);
        block.height += 1;
    });
    let price: CurrentPriceResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::CurrentPrice {})
        .unwrap();
    assert_eq!(price.price.amount, Uint128::new(AUCTION_END_PRICE));

    app.execute_contract(
        second_buyer.clone(),
        minter_address.clone(),
        &ExecuteMsg::AuctionMint { quantity: 2 },
        &[coin(AUCTION_END_PRICE * 2, DENOM)],
    )
    .unwrap();

    let auction_minted: AuctionMintedResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::AuctionMinted {})
        .unwrap();
    assert_eq!(auction_minted.auction_minted, 5);

    // The auction sub-supply is exhausted while the global cap is not
    let total: TotalMintedResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::TotalMinted {})
        .unwrap();
    assert_eq!(total.total_minted, 5);

    let err = app
        .execute_contract(
            outsider,
            minter_address,
            &ExecuteMsg::AuctionMint { quantity: 1 },
            &[coin(AUCTION_END_PRICE, DENOM)],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::Ledger(LedgerError::NoMoreTokensLeft {}));
}

#[test]
fn dutch_auction_creation_rejects_bad_schedule() {
    let res = setup();
    let owner = res.test_accounts.owner;
    let cw721_code_id = res.cw721_code_id;
    let dutch_auction_minter_code_id = res.dutch_auction_minter_code_id;
    let mut app = res.app;

    let start_time = app.block_info().time.plus_seconds(1_000);

    let mut inst_msg = return_dutch_auction_inst_msg(cw721_code_id, start_time);
    inst_msg.auction_schedule.drop_interval = 7;
    let err = app
        .instantiate_contract(
            dutch_auction_minter_code_id,
            owner.clone(),
            &inst_msg,
            &[],
            "dutch-auction-minter",
            None,
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::InvalidAuctionSchedule {});

    let mut inst_msg = return_dutch_auction_inst_msg(cw721_code_id, start_time);
    inst_msg.auction_schedule.drop_per_step = Uint128::new(AUCTION_DROP_PER_STEP - 1);
    let err = app
        .instantiate_contract(
            dutch_auction_minter_code_id,
            owner.clone(),
            &inst_msg,
            &[],
            "dutch-auction-minter",
            None,
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::InvalidAuctionSchedule {});

    let mut inst_msg = return_dutch_auction_inst_msg(cw721_code_id, start_time);
    inst_msg.auction_supply = inst_msg.max_supply + 1;
    let err = app
        .instantiate_contract(
            dutch_auction_minter_code_id,
            owner,
            &inst_msg,
            &[],
            "dutch-auction-minter",
            None,
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::InvalidAuctionSupply {});
}
