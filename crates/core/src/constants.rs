use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Divisor turning a percentage into a fraction
pub const PERCENT_DIVISOR: Decimal = dec!(100);

/// Months per year, used to derive monthly rates and payments
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Down payment percentage at or above which PMI is waived
pub const PMI_WAIVER_DOWN_PAYMENT_PERCENT: Decimal = dec!(20);

/// Largest currency amount accepted for any input
pub const MAX_CURRENCY_AMOUNT: Decimal = dec!(1_000_000_000_000_000);

/// Longest loan term accepted, in years
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// Longest holding horizon accepted, in years
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Decimal precision for percentage display
pub const PERCENT_DISPLAY_PRECISION: u32 = 2;

/// Maximum length of a report name
pub const MAX_REPORT_NAME_LEN: usize = 100;
