/// Invalid arguments passed to [`mortgage_monthly_payment`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MortgageError {
    #[error("principal must be a finite non-negative amount, got {0}")]
    InvalidPrincipal(f64),
    #[error("annual rate must be a finite non-negative fraction, got {0}")]
    InvalidRate(f64),
    #[error("amortization must span at least one month")]
    EmptyAmortization,
    #[error("monthly payment on {principal} is not a representable amount")]
    Unrepresentable { principal: f64 },
}

/// Monthly rate equivalent to a nominal annual rate compounded twice a year,
/// as Canadian fixed-rate mortgages are.
pub fn effective_monthly_rate(nominal_annual_rate: f64) -> f64 {
    ((nominal_annual_rate / 2.0).ln_1p() / 6.0).exp_m1()
}

/// Level monthly payment repaying `principal` over `amortization_months`.
///
/// `annual_rate` is a fraction (`0.05` for 5%).
pub fn mortgage_monthly_payment(
    principal: f64,
    annual_rate: f64,
    amortization_months: u32,
) -> Result<f64, MortgageError> {
    if !principal.is_finite() || principal < 0.0 {
        return Err(MortgageError::InvalidPrincipal(principal));
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(MortgageError::InvalidRate(annual_rate));
    }
    if amortization_months == 0 {
        return Err(MortgageError::EmptyAmortization);
    }

    let n = f64::from(amortization_months);
    let i = effective_monthly_rate(annual_rate);
    if i == 0.0 {
        return Ok(principal / n);
    }

    // P·i / (1 - (1+i)^-n), kept in log space so tiny rates and long terms
    // neither cancel to 0/0 nor overflow.
    let discounted_share = -(-n * i.ln_1p()).exp_m1();
    let payment = principal * i / discounted_share;
    if !payment.is_finite() {
        return Err(MortgageError::Unrepresentable { principal });
    }
    Ok(payment)
}
