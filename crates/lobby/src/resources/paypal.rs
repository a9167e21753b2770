use crate::api::{Api, ApiClient, ApiError, ApiResult};
use crate::data::{CreatePayment, DEFAULT_PAYMENT_DESCRIPTION, Payment};

/// A payment amount as the caller has it: already numeric, or still the text
/// from an input field.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount::Number(f64::from(value))
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount::Text(value)
    }
}

impl Amount {
    /// Resolve to a finite number. Text is read like an input field would be:
    /// leading whitespace is skipped and the longest numeric prefix wins, so
    /// `"25 EUR"` is 25.
    pub fn to_number(&self) -> ApiResult<f64> {
        let number = match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(text) => numeric_prefix(text).and_then(|p| p.parse::<f64>().ok()),
        };
        number.filter(|n| n.is_finite()).ok_or_else(|| {
            ApiError::InvalidAmount(match self {
                Amount::Number(n) => n.to_string(),
                Amount::Text(text) => text.clone(),
            })
        })
    }
}

// sign? digits* (. digits*)? ((e|E) sign? digits+)?, at least one mantissa digit.
fn numeric_prefix(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&text[..end])
}

const CREATE_PAYMENT: &str = "/paypal/create-payment";

pub struct PaypalApi<'a, C> {
    api: &'a Api<C>,
}

impl<C: ApiClient> Api<C> {
    pub fn paypal(&self) -> PaypalApi<'_, C> {
        PaypalApi { api: self }
    }
}

impl<C: ApiClient> PaypalApi<'_, C> {
    /// `POST /paypal/create-payment`
    ///
    /// The amount is always sent as a JSON number. An empty or missing
    /// description is replaced by [`DEFAULT_PAYMENT_DESCRIPTION`]. An amount
    /// that is not a number fails locally without a request.
    pub async fn create_payment(
        &self,
        amount: impl Into<Amount>,
        description: Option<&str>,
    ) -> ApiResult<Payment> {
        let amount = amount
            .into()
            .to_number()
            .map_err(|err| self.api.reject(CREATE_PAYMENT, err))?;
        let description = description
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_PAYMENT_DESCRIPTION)
            .to_string();

        self.api
            .post(
                CREATE_PAYMENT,
                &CreatePayment {
                    amount,
                    description,
                },
            )
            .await
    }

    /// `GET /paypal/payments`
    pub async fn get_payments(&self) -> ApiResult<Vec<Payment>> {
        self.api.get("/paypal/payments").await
    }
}
