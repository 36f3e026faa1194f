//! Priced items: the entity managed by the item pages.
//!
//! Prices are exact decimals with two fractional digits, held as a signed
//! count of hundredths so sums never drift.

use std::fmt;
use std::str::FromStr;

/// Longest accepted item name.
pub const ITEM_NAME_MAX: usize = 100;
/// Digits allowed after the decimal point.
pub const PRICE_DECIMAL_PLACES: usize = 2;
/// Digits allowed in total.
pub const PRICE_MAX_DIGITS: usize = 10;

const WHOLE_DIGITS_MAX: usize = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;
const CENTS_PER_UNIT: i64 = 100;

/// Store-assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(i64);

impl ItemId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Item name validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemNameError {
    #[error("This field is required.")]
    Empty,
    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },
}

/// Display name of an item.
///
/// ## Invariants
/// - Trimmed, between 1 and [`ITEM_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(raw: &str) -> Result<Self, ItemNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ItemNameError::Empty);
        }
        let actual = trimmed.chars().count();
        if actual > ITEM_NAME_MAX {
            return Err(ItemNameError::TooLong {
                max: ITEM_NAME_MAX,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Price parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("This field is required.")]
    Empty,
    #[error("Enter a number.")]
    NotANumber,
    #[error("Ensure that there are no more than {max} decimal places.")]
    TooManyDecimalPlaces { max: usize },
    #[error("Ensure that there are no more than {max} digits before the decimal point.")]
    TooManyWholeDigits { max: usize },
}

/// Exact decimal price with two fractional digits.
///
/// # Examples
/// ```
/// use pricebook::domain::Price;
///
/// let price: Price = "9.99".parse().unwrap();
/// assert_eq!(price.cents(), 999);
/// assert_eq!(price.to_string(), "9.99");
/// assert_eq!("12".parse::<Price>().unwrap().to_string(), "12.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(i64);

impl Price {
    /// Zero, the total of an empty list.
    pub const ZERO: Self = Self(0);

    /// Build a price from a count of hundredths.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Add two prices, returning `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Sum a sequence of prices, returning `None` on overflow.
    pub fn checked_sum<I>(prices: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        prices
            .into_iter()
            .try_fold(Self::ZERO, |total, price| total.checked_add(price))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_unit = CENTS_PER_UNIT.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:02}",
            magnitude / per_unit,
            magnitude % per_unit
        )
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(PriceError::NotANumber);
        }
        if fraction.len() > PRICE_DECIMAL_PLACES {
            return Err(PriceError::TooManyDecimalPlaces {
                max: PRICE_DECIMAL_PLACES,
            });
        }
        let significant_whole = whole.trim_start_matches('0');
        if significant_whole.len() > WHOLE_DIGITS_MAX {
            return Err(PriceError::TooManyWholeDigits {
                max: WHOLE_DIGITS_MAX,
            });
        }

        let units = parse_digits(significant_whole)?;
        let hundredths = parse_digits(&format!("{fraction:0<width$}", width = PRICE_DECIMAL_PLACES))?;
        let cents = units * CENTS_PER_UNIT + hundredths;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

fn parse_digits(digits: &str) -> Result<i64, PriceError> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse().map_err(|_| PriceError::NotANumber)
}

/// Stored item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    name: ItemName,
    price: Price,
}

impl Item {
    pub fn new(id: ItemId, name: ItemName, price: Price) -> Self {
        Self { id, name, price }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

/// Field-level problems found in an item submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraftError {
    pub name: Option<ItemNameError>,
    pub price: Option<PriceError>,
}

/// Validated fields for creating or replacing an item.
///
/// # Examples
/// ```
/// use pricebook::domain::ItemDraft;
///
/// let draft = ItemDraft::try_from_parts("Widget", "9.99").unwrap();
/// assert_eq!(draft.name().as_ref(), "Widget");
/// assert_eq!(draft.price().cents(), 999);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    name: ItemName,
    price: Price,
}

impl ItemDraft {
    pub fn new(name: ItemName, price: Price) -> Self {
        Self { name, price }
    }

    /// Validate raw form values, reporting every failing field.
    pub fn try_from_parts(name: &str, price: &str) -> Result<Self, ItemDraftError> {
        match (ItemName::new(name), price.parse::<Price>()) {
            (Ok(name), Ok(price)) => Ok(Self { name, price }),
            (name, price) => Err(ItemDraftError {
                name: name.err(),
                price: price.err(),
            }),
        }
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Attach a store-assigned identifier.
    pub fn into_item(self, id: ItemId) -> Item {
        Item::new(id, self.name, self.price)
    }
}
