/// Bound divisor of the gas limit, used in update calculations.
pub const GAS_LIMIT_BOUND_DIVISOR: u64 = 1024;

/// Minimum the gas limit may ever be.
pub const MIN_GAS_LIMIT: u64 = 5000;

/// Computes the gas limit of the next block after a parent with the given
/// usage.
///
/// The limit tracks usage (aiming at 1.5x the parent's gas used) and, when it
/// falls outside `[gas_floor, gas_ceil]`, hones towards that range by at most
/// one bound step per block.
pub fn calc_gas_limit(
    parent_gas_used: u64,
    parent_gas_limit: u64,
    gas_floor: u64,
    gas_ceil: u64,
) -> u64 {
    let contrib = parent_gas_used.saturating_add(parent_gas_used / 2) / GAS_LIMIT_BOUND_DIVISOR;
    let decay = (parent_gas_limit / GAS_LIMIT_BOUND_DIVISOR).saturating_sub(1);

    let mut limit = parent_gas_limit
        .saturating_sub(decay)
        .saturating_add(contrib)
        .max(MIN_GAS_LIMIT);

    if limit < gas_floor {
        limit = parent_gas_limit.saturating_add(decay).min(gas_floor);
    } else if limit > gas_ceil {
        limit = parent_gas_limit.saturating_sub(decay).max(gas_ceil);
    }
    limit
}
