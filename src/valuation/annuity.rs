//! Level annuity pricing and rate conversion helpers

/// Convert an effective annual rate to the equivalent effective monthly rate
pub fn monthly_rate_from_annual(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Present value of a level annuity-due (payment at the start of each month)
///
/// A rate of exactly zero returns the undiscounted total; zero months
/// returns zero for any rate.
pub fn present_value_annuity_due(payment: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return payment * months as f64;
    }

    let v = 1.0 / (1.0 + monthly_rate);
    payment * ((1.0 - v.powi(months as i32)) / monthly_rate) * (1.0 + monthly_rate)
}

/// Discount an amount back `years` whole years at an annual rate
pub fn discount_years(amount: f64, annual_rate: f64, years: u32) -> f64 {
    amount / (1.0 + annual_rate).powi(years as i32)
}

/// Accumulate an amount forward `years` whole years at an annual rate
pub fn compound_years(amount: f64, annual_rate: f64, years: u32) -> f64 {
    amount * (1.0 + annual_rate).powi(years as i32)
}
