/* This file is part of Gegofi (https://gego.fi)
 *
 * Copyright (C) 2021-2026 Gegofi foundation
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Table rendering of fetched state.
use prettytable::{format, row, Table};
use rust_decimal::Decimal;

use gegofi::{
    gego::{Collections, Gego},
    state::{
        analytics::{BurnRecord, Proposal},
        farm::PoolInfo,
        nft::GenerationViews,
        sale::SaleInfo,
        vault::VaultInfo,
        GenerationPair,
    },
    util::parse::{encode_base10, BALANCE_BASE10_DECIMALS},
};

pub fn render_farm_pools(pools: &GenerationPair<Option<PoolInfo>>) {
    render_farm_pool("Legacy mine", &pools.old);
    render_farm_pool("Current mine", &pools.new);
}

fn render_farm_pool(label: &str, pool: &Option<PoolInfo>) {
    let Some(pool) = pool else {
        println!("{label}: not deployed on this network");
        return
    };

    let mut table = new_table();
    table.set_titles(row!["Pool", "Total staked", "Reward rate", "Your stake", "Pending"]);
    table.add_row(row![
        pool.address,
        balance(&pool.staked_total),
        balance(&pool.reward_rate),
        balance(&pool.user_staked),
        balance(&pool.user_pending),
    ]);

    println!("{label}:");
    table.printstd();
}

pub fn render_vaults(vaults: &GenerationPair<Option<VaultInfo>>) {
    render_vault("Legacy vault", &vaults.old);
    render_vault("Current vault", &vaults.new);
}

fn render_vault(label: &str, vault: &Option<VaultInfo>) {
    let Some(vault) = vault else {
        println!("{label}: not deployed on this network");
        return
    };

    let mut table = new_table();
    table.set_titles(row!["Vault", "Total deposits", "Your shares", "Pending"]);
    table.add_row(row![
        vault.address,
        balance(&vault.total_deposits),
        balance(&vault.user_shares),
        balance(&vault.user_pending),
    ]);

    println!("{label}:");
    table.printstd();
}

pub fn render_gegos(views: &GenerationViews, collections: &Collections) {
    render_gego_view("Legacy generation", &views.legacy, collections);
    render_gego_view("Current generation", &views.current, collections);
}

fn render_gego_view(label: &str, gegos: &[Gego], collections: &Collections) {
    if gegos.is_empty() {
        println!("{label}: no items");
        return
    }

    let mut table = new_table();
    table.set_titles(row!["ID", "Grade", "Quality", "Efficiency", "Amount", "Staked"]);
    for gego in gegos {
        table.add_row(row![
            gego.id,
            gego.grade_config(collections).grade.title(),
            gego.quality,
            efficiency(gego.efficiency),
            balance(&gego.amount),
            if gego.staked { "yes" } else { "no" },
        ]);
    }

    println!("{label}:");
    table.printstd();
}

pub fn render_sale(info: &SaleInfo) {
    let mut table = new_table();
    table.set_titles(row!["Price", "Cap", "Sold", "Your purchase"]);
    table.add_row(row![
        balance(&info.price),
        balance(&info.cap),
        balance(&info.sold),
        balance(&info.purchased),
    ]);
    table.printstd();
}

pub fn render_burns(records: &[BurnRecord]) {
    if records.is_empty() {
        println!("No burns recorded");
        return
    }

    let mut table = new_table();
    table.set_titles(row!["ID", "Amount", "Timestamp"]);
    for record in records {
        table.add_row(row![record.id, balance(&record.amount), record.timestamp]);
    }
    table.printstd();
}

pub fn render_proposals(proposals: &[Proposal]) {
    if proposals.is_empty() {
        println!("No proposals");
        return
    }

    let mut table = new_table();
    table.set_titles(row!["ID", "Title", "State", "For", "Against"]);
    for proposal in proposals {
        table.add_row(row![
            proposal.id,
            proposal.title,
            proposal.state,
            balance(&proposal.votes_for),
            balance(&proposal.votes_against),
        ]);
    }
    table.printstd();
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table
}

fn balance(amount: &num_bigint::BigUint) -> String {
    encode_base10(amount, BALANCE_BASE10_DECIMALS)
}

/// Scale the on-chain efficiency units down to the display form.
fn efficiency(raw: Decimal) -> Decimal {
    (raw / Decimal::from(100000)).normalize()
}
