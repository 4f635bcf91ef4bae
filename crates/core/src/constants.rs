/// Page size used when a listing request does not specify one
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Largest number of decimal places a currency may declare
pub const MAX_DECIMAL_PLACES: u32 = 12;

/// Bounds on currency field lengths, in characters
pub const CURRENCY_CODE_LENGTH: (usize, usize) = (3, 51);
pub const CURRENCY_NAME_LENGTH: (usize, usize) = (1, 255);
pub const CURRENCY_SYMBOL_LENGTH: (usize, usize) = (1, 8);

/// Endpoint key of the budget listing
pub const BUDGET_LIST_ENDPOINT: &str = "budgets.list";

/// Where the budget listing is due to move
pub const BUDGET_LIST_DESTINATION: &str = "IndexController";
