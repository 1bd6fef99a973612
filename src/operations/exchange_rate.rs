//! Exchange-rate lookup.

use serde::{Deserialize, Serialize};

use crate::classify::ResponseSchema;
use crate::config::Credentials;
use crate::envelope::{Element, SoapEnvelope};
use crate::operation::{Operation, Payload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRateParams {
    pub from_currency: String,
    pub to_currency: String,
    /// Rate type understood by the core (`CASH`, `TRANSFER`, ...).
    pub rate_type: Option<String>,
}

/// Rates are kept as the decimal text the core returns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub buy_rate: String,
    pub sell_rate: String,
    #[serde(default)]
    pub mid_rate: Option<String>,
    #[serde(default)]
    pub rate_date: Option<String>,
}

pub struct ExchangeRateOp;

impl Operation for ExchangeRateOp {
    const NAME: &'static str = "GetExchangeRate";
    type Params = ExchangeRateParams;
    type Detail = ExchangeRate;

    fn schema() -> ResponseSchema {
        ResponseSchema::xml("GetExchangeRateResponse")
    }

    fn render(params: &Self::Params, credentials: &Credentials) -> Payload {
        let request = Element::new("GetExchangeRateRequest")
            .field("FromCurrency", params.from_currency.as_str())
            .field("ToCurrency", params.to_currency.as_str())
            .optional_field("RateType", params.rate_type.as_deref());

        Payload::soap(&SoapEnvelope::new(request).with_credentials(credentials), Self::NAME)
    }
}
