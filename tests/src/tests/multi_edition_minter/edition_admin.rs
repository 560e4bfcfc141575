use cosmwasm_std::{coin, Addr, Uint128};
use cw_multi_test::Executor;

use mint_ledger::LedgerError;
use multi_edition_minter::error::ContractError;
use multi_edition_minter::msg::{EditionResponse, ExecuteMsg, QueryMsg};
use sale_types::{MintCountResponse, TotalMintedResponse};

use crate::helpers::merkle::build_allowlist;
use crate::helpers::mock_messages::{return_multi_edition_inst_msg, DENOM, UNIT_PRICE};
use crate::helpers::setup::setup;
use crate::helpers::utils::query_token_owner;

#[test]
fn set_edition_supply() {
    let res = setup();
    let owner = res.test_accounts.owner;
    let buyer = res.test_accounts.buyer;
    let outsider = res.test_accounts.outsider;
    let cw721_code_id = res.cw721_code_id;
    let multi_edition_minter_code_id = res.multi_edition_minter_code_id;
    let mut app = res.app;

    let (root, _proofs) = build_allowlist(&[buyer.as_str()]);
    let inst_msg = return_multi_edition_inst_msg(cw721_code_id, &root);
    let minter_address = app
        .instantiate_contract(
            multi_edition_minter_code_id,
            owner.clone(),
            &inst_msg,
            &[],
            "multi-edition-minter",
            None,
        )
        .unwrap();

    app.execute_contract(
        owner.clone(),
        minter_address.clone(),
        &ExecuteMsg::ToggleMinting {},
        &[],
    )
    .unwrap();
    app.execute_contract(
        owner.clone(),
        minter_address.clone(),
        &ExecuteMsg::ToggleWhitelistOnly {},
        &[],
    )
    .unwrap();

    let err = app
        .execute_contract(
            outsider.clone(),
            minter_address.clone(),
            &ExecuteMsg::SetEditionSupply {
                edition_id: 5,
                max_supply: 4,
            },
            &[],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::Unauthorized {});

    // The owner can open a new edition after instantiation
    app.execute_contract(
        owner.clone(),
        minter_address.clone(),
        &ExecuteMsg::SetEditionSupply {
            edition_id: 5,
            max_supply: 4,
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        outsider.clone(),
        minter_address.clone(),
        &ExecuteMsg::Mint {
            edition_id: 5,
            quantity: 2,
            proof: vec![],
        },
        &[coin(UNIT_PRICE * 2, DENOM)],
    )
    .unwrap();

    // Issued units can never be capped away
    let err = app
        .execute_contract(
            owner.clone(),
            minter_address.clone(),
            &ExecuteMsg::SetEditionSupply {
                edition_id: 5,
                max_supply: 1,
            },
            &[],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::InvalidEditionSupply {});

    // Shrinking down to exactly the minted count closes the edition
    app.execute_contract(
        owner,
        minter_address.clone(),
        &ExecuteMsg::SetEditionSupply {
            edition_id: 5,
            max_supply: 2,
        },
        &[],
    )
    .unwrap();

    let err = app
        .execute_contract(
            outsider,
            minter_address.clone(),
            &ExecuteMsg::Mint {
                edition_id: 5,
                quantity: 1,
                proof: vec![],
            },
            &[coin(UNIT_PRICE, DENOM)],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::Ledger(LedgerError::NoMoreTokensLeft {}));

    let edition: EditionResponse = app
        .wrap()
        .query_wasm_smart(minter_address, &QueryMsg::Edition { edition_id: 5 })
        .unwrap();
    assert_eq!(edition.supply.minted, 2);
    assert_eq!(edition.supply.max_supply, 2);
}

#[test]
fn set_unit_price() {
    let res = setup();
    let owner = res.test_accounts.owner;
    let buyer = res.test_accounts.buyer;
    let outsider = res.test_accounts.outsider;
    let cw721_code_id = res.cw721_code_id;
    let multi_edition_minter_code_id = res.multi_edition_minter_code_id;
    let mut app = res.app;

    let (root, _proofs) = build_allowlist(&[buyer.as_str()]);
    let inst_msg = return_multi_edition_inst_msg(cw721_code_id, &root);
    let minter_address = app
        .instantiate_contract(
            multi_edition_minter_code_id,
            owner.clone(),
            &inst_msg,
            &[],
            "multi-edition-minter",
            None,
        )
        .unwrap();

    app.execute_contract(
        owner.clone(),
        minter_address.clone(),
        &ExecuteMsg::ToggleMinting {},
        &[],
    )
    .unwrap();
    app.execute_contract(
        owner.clone(),
        minter_address.clone(),
        &ExecuteMsg::ToggleWhitelistOnly {},
        &[],
    )
    .unwrap();

    let err = app
        .execute_contract(
            outsider.clone(),
            minter_address.clone(),
            &ExecuteMsg::SetUnitPrice {
                price: coin(UNIT_PRICE * 2, DENOM),
            },
            &[],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::Unauthorized {});

    let err = app
        .execute_contract(
            owner.clone(),
            minter_address.clone(),
            &ExecuteMsg::SetUnitPrice {
                price: coin(0, DENOM),
            },
            &[],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::InvalidUnitPrice {});

    app.execute_contract(
        owner,
        minter_address.clone(),
        &ExecuteMsg::SetUnitPrice {
            price: coin(UNIT_PRICE * 2, DENOM),
        },
        &[],
    )
    .unwrap();

    // The old price no longer settles a mint
    let err = app
        .execute_contract(
            outsider.clone(),
            minter_address.clone(),
            &ExecuteMsg::Mint {
                edition_id: 1,
                quantity: 1,
                proof: vec![],
            },
            &[coin(UNIT_PRICE, DENOM)],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(
        err,
        &ContractError::InvalidValueProvided {
            expected: Uint128::new(UNIT_PRICE * 2),
            sent: Uint128::new(UNIT_PRICE),
        }
    );

    app.execute_contract(
        outsider,
        minter_address,
        &ExecuteMsg::Mint {
            edition_id: 1,
            quantity: 1,
            proof: vec![],
        },
        &[coin(UNIT_PRICE * 2, DENOM)],
    )
    .unwrap();
}

#[test]
fn multi_edition_airdrop() {
    let res = setup();
    let owner = res.test_accounts.owner;
    let buyer = res.test_accounts.buyer;
    let second_buyer = res.test_accounts.second_buyer;
    let outsider = res.test_accounts.outsider;
    let cw721_code_id = res.cw721_code_id;
    let multi_edition_minter_code_id = res.multi_edition_minter_code_id;
    let mut app = res.app;

    let (root, _proofs) = build_allowlist(&[buyer.as_str()]);
    let inst_msg = return_multi_edition_inst_msg(cw721_code_id, &root);
    let minter_address = app
        .instantiate_contract(
            multi_edition_minter_code_id,
            owner.clone(),
            &inst_msg,
            &[],
            "multi-edition-minter",
            None,
        )
        .unwrap();

    let err = app
        .execute_contract(
            owner.clone(),
            minter_address.clone(),
            &ExecuteMsg::Airdrop {
                recipients: vec![buyer.to_string(), second_buyer.to_string()],
                edition_ids: vec![1],
                quantities: vec![1, 1],
            },
            &[],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::MismatchedAirdropInput {});

    // A batch that would blow an edition cap is rejected as one unit
    let err = app
        .execute_contract(
            owner.clone(),
            minter_address.clone(),
            &ExecuteMsg::Airdrop {
                recipients: vec![buyer.to_string(), second_buyer.to_string()],
                edition_ids: vec![2, 2],
                quantities: vec![2, 2],
            },
            &[],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::Ledger(LedgerError::NoMoreTokensLeft {}));

    let edition: EditionResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::Edition { edition_id: 2 })
        .unwrap();
    assert_eq!(edition.supply.minted, 0);

    let total: TotalMintedResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::TotalMinted {})
        .unwrap();
    assert_eq!(total.total_minted, 0);

    // Unknown editions fail the whole batch too
    let err = app
        .execute_contract(
            owner.clone(),
            minter_address.clone(),
            &ExecuteMsg::Airdrop {
                recipients: vec![outsider.to_string()],
                edition_ids: vec![42],
                quantities: vec![1],
            },
            &[],
        )
        .unwrap_err();
    let err = err.source().unwrap().downcast_ref::<ContractError>().unwrap();
    assert_eq!(err, &ContractError::InvalidToken {});

    app.execute_contract(
        owner,
        minter_address.clone(),
        &ExecuteMsg::Airdrop {
            recipients: vec![buyer.to_string(), second_buyer.to_string()],
            edition_ids: vec![1, 2],
            quantities: vec![2, 2],
        },
        &[],
    )
    .unwrap();

    let total: TotalMintedResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::TotalMinted {})
        .unwrap();
    assert_eq!(total.total_minted, 4);

    let edition: EditionResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::Edition { edition_id: 1 })
        .unwrap();
    assert_eq!(edition.supply.minted, 2);
    let edition: EditionResponse = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &QueryMsg::Edition { edition_id: 2 })
        .unwrap();
    assert_eq!(edition.supply.minted, 2);

    // Quota untouched, token ids run sequentially across the batch
    let count: MintCountResponse = app
        .wrap()
        .query_wasm_smart(
            minter_address.clone(),
            &QueryMsg::MintCount {
                address: buyer.to_string(),
            },
        )
        .unwrap();
    assert_eq!(count.count, 0);

    let token_contract: Addr = app
        .wrap()
        .query_wasm_smart(minter_address, &QueryMsg::TokenContract {})
        .unwrap();
    assert_eq!(
        query_token_owner(&app, token_contract.as_str(), "2"),
        buyer.to_string()
    );
    assert_eq!(
        query_token_owner(&app, token_contract.as_str(), "3"),
        second_buyer.to_string()
    );
}
