//! Present value calculations for the early and deferred income streams
//!
//! - **annuity**: level annuity-due pricing and rate conversion
//! - **epv**: mortality-weighted expected present value
//! - **breakeven**: economic (discounted) and nominal breakeven ages

mod annuity;
mod epv;
mod breakeven;

pub use annuity::{
    compound_years,
    discount_years,
    monthly_rate_from_annual,
    present_value_annuity_due,
};

pub use epv::{expected_present_value, pre_retirement_divisor};

pub use breakeven::{
    economic_breakeven_age,
    first_economic_crossing,
    nominal_breakeven_age,
    stream_values,
    StreamValues,
};
