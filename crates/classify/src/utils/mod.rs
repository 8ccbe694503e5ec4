pub(crate) mod abi;
pub(crate) mod coerce;
