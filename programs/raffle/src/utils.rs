use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// Moves `amount` lamports out of a program-owned account, keeping at least
/// `reserve` lamports (its rent-exempt minimum) behind.
pub fn transfer_lamports(
    from: &AccountInfo,
    to: &AccountInfo,
    amount: u64,
    reserve: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    require_keys_neq!(*from.key, *to.key, ErrorCode::TransferFailed);
    require!(from.is_writable && to.is_writable, ErrorCode::TransferFailed);

    let remaining = from
        .lamports()
        .checked_sub(amount)
        .ok_or(ErrorCode::TransferFailed)?;
    require!(remaining >= reserve, ErrorCode::TransferFailed);
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(ErrorCode::TransferFailed)?;

    **from.try_borrow_mut_lamports()? = remaining;
    **to.try_borrow_mut_lamports()? = credited;

    Ok(())
}

/// Looks an account up by key among an instruction's remaining accounts.
pub fn find_account<'a, 'info>(
    accounts: &'a [AccountInfo<'info>],
    key: &Pubkey,
) -> Option<&'a AccountInfo<'info>> {
    accounts.iter().find(|account| account.key == key)
}
