//!
//! The spend pipeline. Stages run in a fixed order over one [`SpendLedger`]:
//! locked UTXOs first (stake only), then unlocked UTXOs (burn, stake and
//! fee), then requirement verification and finally fee and change resolution.
//!

use super::{OwnersMatch, SpendLedger, SpendResult, SpendSettings, match_owners};
use crate::imports::*;

/// Parameters shared by the UTXO selection stages.
pub struct SpendContext<'a> {
    pub controlled: &'a AHashSet<Address>,
    pub min_issuance_time: u64,
    pub change_owners: &'a OutputOwners,
}

/// Builds the input spending `utxo`. A stakeable UTXO is always spent
/// through a stakeable input carrying the same lock.
fn make_input(utxo: &UtxoEntry, amount: Amount, sig_indices: Vec<u32>) -> TransactionInput {
    let transfer = TransferInput::new(amount, sig_indices);
    let input = match &utxo.output {
        Output::StakeableLock(locked) => StakeableLockInput::new(locked.locktime, transfer).into(),
        _ => transfer.into(),
    };
    TransactionInput::new(utxo.outpoint, utxo.asset_id, input)
}

/// Spendable as if unlocked: a transfer, or a stakeable output whose lock expired.
fn is_unlocked(utxo: &UtxoEntry, min_issuance_time: u64) -> bool {
    match &utxo.output {
        Output::Transfer(_) => true,
        Output::StakeableLock(locked) => !locked.is_locked_at(min_issuance_time),
        Output::Unsupported { .. } => false,
    }
}

/// Stakes still locked UTXOs. The staked part and any remainder keep the
/// UTXO's lock and owners.
pub fn use_locked_utxos(ledger: &mut SpendLedger, utxos: &[UtxoEntry], ctx: &SpendContext<'_>) -> Result<()> {
    let mut candidates = 0;
    let mut matched = 0;

    for utxo in utxos {
        let Output::StakeableLock(locked) = &utxo.output else { continue };
        if !locked.is_locked_at(ctx.min_issuance_time) {
            continue;
        }
        if !ledger.should_consume_locked_asset(&utxo.asset_id) {
            trace!("locked utxo {}: no stake demand for asset {}", utxo.outpoint, utxo.asset_id);
            continue;
        }

        candidates += 1;
        let transfer = &locked.transfer_output;
        let Some(found) = match_owners(&transfer.owners, ctx.controlled, ctx.min_issuance_time, None) else {
            trace!("locked utxo {}: not signable", utxo.outpoint);
            continue;
        };
        matched += 1;

        ledger.add_input(utxo, make_input(utxo, transfer.amount, found.sig_indices), found.address_map)?;
        let remaining = ledger.consume_locked_asset(&utxo.asset_id, transfer.amount);
        let staked = transfer.amount - remaining;
        trace!("locked utxo {}: staking {} of {}", utxo.outpoint, staked, transfer.amount);

        if staked > 0 {
            ledger.add_stake_output(TransactionOutput::stakeable_lock(
                utxo.asset_id,
                locked.locktime,
                staked,
                transfer.owners.clone(),
            ));
        }
        if remaining > 0 {
            ledger.add_change_output(TransactionOutput::stakeable_lock(
                utxo.asset_id,
                locked.locktime,
                remaining,
                transfer.owners.clone(),
            ));
        }
    }

    if candidates > 0 && matched == 0 {
        debug!("locked stage: none of {} candidates is signable", candidates);
        return Err(Error::NoSignableUtxo { stage: SpendStage::Locked, candidates });
    }
    debug!("locked stage: {} of {} candidates used", matched, candidates);
    Ok(())
}

/// Burns and stakes from unlocked UTXOs, non-fee assets first. Fee asset
/// leftovers are not turned into change here but returned as the excess
/// available to pay the fee.
///
/// Every unlocked UTXO is matched before any is consumed, so a candidate set
/// without a single signable UTXO fails even when nothing would be consumed.
pub fn use_unlocked_utxos(ledger: &mut SpendLedger, utxos: &[UtxoEntry], ctx: &SpendContext<'_>) -> Result<u64> {
    let fee_asset_id = *ledger.fee_asset_id();
    let candidates = utxos.iter().filter(|utxo| is_unlocked(utxo, ctx.min_issuance_time)).collect::<Vec<_>>();
    let signable = candidates
        .iter()
        .copied()
        .filter_map(|utxo| {
            let transfer = utxo.output.transfer_output()?;
            let found = match_owners(&transfer.owners, ctx.controlled, ctx.min_issuance_time, None);
            if found.is_none() {
                trace!("utxo {}: not signable", utxo.outpoint);
            }
            found.map(|found| (utxo, transfer, found))
        })
        .collect::<Vec<_>>();

    if !candidates.is_empty() && signable.is_empty() {
        debug!("unlocked stage: none of {} candidates is signable", candidates.len());
        return Err(Error::NoSignableUtxo { stage: SpendStage::Unlocked, candidates: candidates.len() });
    }

    let (fee_utxos, other_utxos): (Vec<_>, Vec<_>) = signable.into_iter().partition(|(utxo, _, _)| utxo.asset_id == fee_asset_id);
    let mut used = 0;
    let mut excess: u64 = 0;

    for (utxo, transfer, found) in other_utxos {
        if !ledger.should_consume_asset(&utxo.asset_id) {
            trace!("utxo {}: no demand for asset {}", utxo.outpoint, utxo.asset_id);
            continue;
        }
        let remaining = use_unlocked_utxo(ledger, utxo, transfer, found, ctx)?;
        used += 1;
        if remaining > 0 {
            ledger.add_change_output(TransactionOutput::transfer(utxo.asset_id, remaining, ctx.change_owners.clone()));
        }
    }

    for (utxo, transfer, found) in fee_utxos {
        if !ledger.should_consume_asset(&fee_asset_id) && excess >= ledger.calculate_fee(None)? {
            trace!("fee utxo {}: excess {} covers the fee", utxo.outpoint, excess);
            break;
        }
        let remaining = use_unlocked_utxo(ledger, utxo, transfer, found, ctx)?;
        used += 1;
        excess = excess.checked_add(remaining).ok_or_else(|| Error::overflow("fee asset excess"))?;
    }

    debug!("unlocked stage: {} of {} candidates used, fee asset excess {}", used, candidates.len(), excess);
    Ok(excess)
}

/// Spends one signable unlocked UTXO. The staked part becomes a stake output
/// paying the change owners. Returns the unconsumed amount.
fn use_unlocked_utxo(
    ledger: &mut SpendLedger,
    utxo: &UtxoEntry,
    transfer: &TransferOutput,
    found: OwnersMatch,
    ctx: &SpendContext<'_>,
) -> Result<Amount> {
    ledger.add_input(utxo, make_input(utxo, transfer.amount, found.sig_indices), found.address_map)?;
    let stake_demand = ledger.to_stake(&utxo.asset_id);
    let remaining = ledger.consume_asset(&utxo.asset_id, transfer.amount);
    let staked = stake_demand - ledger.to_stake(&utxo.asset_id);
    trace!("utxo {}: consumed {} of {}, staked {}", utxo.outpoint, transfer.amount - remaining, transfer.amount, staked);

    if staked > 0 {
        ledger.add_stake_output(TransactionOutput::transfer(utxo.asset_id, staked, ctx.change_owners.clone()));
    }
    Ok(remaining)
}

pub fn verify(ledger: &SpendLedger) -> Result<()> {
    ledger.verify_assets_consumed().inspect_err(|err| debug!("verification failed: {}", err))
}

/// Settles the fee from `excess` and returns the fee actually paid. The
/// remainder goes to change unless a new change output costs more than it
/// would return.
pub fn handle_fee_and_change(ledger: &mut SpendLedger, excess: u64, change_owners: &OutputOwners) -> Result<u64> {
    let fee_asset_id = *ledger.fee_asset_id();
    let required_fee = ledger.calculate_fee(None)?;

    if excess < required_fee {
        debug!("fee: excess {} is short of the required fee {}", excess, required_fee);
        return Err(Error::InsufficientFunds { asset_id: fee_asset_id, purpose: Purpose::Fee, shortfall: required_fee - excess });
    }
    if excess == required_fee {
        debug!("fee: excess {} pays the fee exactly", excess);
        return Ok(excess);
    }

    if let Some(output) = ledger.fee_change_output_mut(change_owners) {
        let amount = output.amount_mut().ok_or_else(|| Error::structural("fee change output carries no amount"))?;
        *amount = amount.checked_add(excess - required_fee).ok_or_else(|| Error::overflow("fee change amount"))?;
        debug!("fee: {} paid, {} added to the existing change output", required_fee, excess - required_fee);
        return Ok(required_fee);
    }

    let change = TransactionOutput::transfer(fee_asset_id, 0, change_owners.clone());
    let fee_with_change = ledger.calculate_fee(Some(&change))?;
    if excess > fee_with_change {
        debug!("fee: {} paid, {} returned as change", fee_with_change, excess - fee_with_change);
        ledger.add_change_output(TransactionOutput::transfer(fee_asset_id, excess - fee_with_change, change_owners.clone()));
        Ok(fee_with_change)
    } else {
        debug!("fee: change output is not worth its fee {}, burning excess {}", fee_with_change, excess);
        Ok(excess)
    }
}

/// Each UTXO may be offered once.
fn check_unique_outpoints(utxos: &[UtxoEntry]) -> Result<()> {
    let mut seen = AHashSet::with_capacity(utxos.len());
    match utxos.iter().find(|utxo| !seen.insert(utxo.outpoint)) {
        Some(utxo) => Err(Error::structural(format!("utxo {} is offered more than once", utxo.outpoint))),
        None => Ok(()),
    }
}

/// Selects inputs and produces outputs satisfying the burn and stake
/// requirements of `settings`, paying the fee with the fee asset.
pub fn spend(settings: SpendSettings) -> Result<SpendResult> {
    check_unique_outpoints(&settings.utxos)?;
    let min_issuance_time = settings.min_issuance_time();
    let change_owners = settings.change_owners()?;
    let SpendSettings { initial_complexity, to_burn, to_stake, utxos, controlled_addresses, fee_asset_id, gas_price, weights, .. } =
        settings;

    let controlled = controlled_addresses.into_iter().collect::<AHashSet<_>>();
    let ctx = SpendContext { controlled: &controlled, min_issuance_time, change_owners: &change_owners };
    let mut ledger = SpendLedger::new(fee_asset_id, gas_price, weights, initial_complexity, to_burn, to_stake);

    debug!("spend: {} utxos, {} controlled addresses, min issuance time {}", utxos.len(), controlled.len(), min_issuance_time);

    use_locked_utxos(&mut ledger, &utxos, &ctx)?;
    let excess = use_unlocked_utxos(&mut ledger, &utxos, &ctx)?;
    verify(&ledger)?;
    let fee = handle_fee_and_change(&mut ledger, excess, &change_owners)?;

    let result = ledger.into_result(fee)?;
    debug!("spend: {}", result);
    Ok(result)
}

/// [`spend`] with every parameter given explicitly.
#[allow(clippy::too_many_arguments)]
pub fn spend_with(
    initial_complexity: Dimensions,
    to_burn: BTreeMap<AssetId, Amount>,
    to_stake: BTreeMap<AssetId, Amount>,
    utxos: Vec<UtxoEntry>,
    controlled_addresses: Vec<Address>,
    min_issuance_time: u64,
    change_owners: OutputOwners,
    gas_price: u64,
    weights: Dimensions,
    fee_asset_id: AssetId,
) -> Result<SpendResult> {
    spend(SpendSettings {
        initial_complexity,
        to_burn,
        to_stake,
        utxos,
        controlled_addresses,
        fee_asset_id,
        gas_price,
        weights,
        options: super::SpendOptions { min_issuance_time: Some(min_issuance_time), change_owners: Some(change_owners) },
    })
}
