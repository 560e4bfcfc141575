use cosmwasm_std::{Coin, Empty};
use cw_multi_test::{App, AppResponse, BankSudo, SudoMsg};

pub fn get_contract_address_from_res(res: AppResponse) -> String {
    res.events
        .iter()
        .find(|e| e.ty == "instantiate")
        .unwrap()
        .attributes
        .iter()
        .find(|a| a.key == "_contract_address")
        .unwrap()
        .value
        .clone()
}

pub fn mint_to_address(app: &mut App, to_address: String, amount: Vec<Coin>) {
    app.sudo(SudoMsg::Bank(BankSudo::Mint { to_address, amount }))
        .unwrap();
}

pub fn query_token_owner(app: &App, token_contract: &str, token_id: &str) -> String {
    let res: cw721::OwnerOfResponse = app
        .wrap()
        .query_wasm_smart(
            token_contract,
            &cw721_base::QueryMsg::<Empty>::OwnerOf {
                token_id: token_id.to_string(),
                include_expired: None,
            },
        )
        .unwrap();
    res.owner
}

pub fn query_token_count(app: &App, token_contract: &str) -> u64 {
    let res: cw721::NumTokensResponse = app
        .wrap()
        .query_wasm_smart(token_contract, &cw721_base::QueryMsg::<Empty>::NumTokens {})
        .unwrap();
    res.count
}
