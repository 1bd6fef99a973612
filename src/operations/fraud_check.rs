//! Fraud screening over the JSON route.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::classify::ResponseSchema;
use crate::config::Credentials;
use crate::operation::{Operation, Payload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraudCheckParams {
    pub transaction_reference: String,
    pub account_number: String,
    pub amount: String,
    pub currency: String,
    pub channel: String,
    pub beneficiary_account: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAssessment {
    /// `ALLOW`, `REVIEW` or `BLOCK`.
    pub decision: String,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

pub struct FraudCheckOp;

impl Operation for FraudCheckOp {
    const NAME: &'static str = "FraudCheck";
    type Params = FraudCheckParams;
    type Detail = FraudAssessment;

    fn schema() -> ResponseSchema {
        ResponseSchema::json()
    }

    /// Credentials travel in headers on this route, not in the body.
    fn render(params: &Self::Params, _credentials: &Credentials) -> Payload {
        Payload::json(&json!({
            "transactionReference": params.transaction_reference,
            "accountNumber": params.account_number,
            "amount": params.amount,
            "currency": params.currency,
            "channel": params.channel,
            "beneficiaryAccount": params.beneficiary_account,
        }))
    }
}
