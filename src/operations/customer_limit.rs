//! Customer transaction limit amendment.

use serde::{Deserialize, Serialize};

use crate::classify::ResponseSchema;
use crate::config::Credentials;
use crate::envelope::{Element, SoapEnvelope};
use crate::operation::{Operation, Payload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerLimitParams {
    pub customer_id: String,
    /// Limit family, e.g. `DAILY_TRANSFER` or `POS`.
    pub limit_type: String,
    pub amount: String,
    pub currency: String,
    pub effective_date: Option<String>,
}

/// Every field is optional; some cores acknowledge with an empty detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LimitAmendment {
    pub customer_id: Option<String>,
    pub limit_type: Option<String>,
    pub previous_limit: Option<String>,
    pub new_limit: Option<String>,
    pub effective_date: Option<String>,
}

pub struct CustomerLimitOp;

impl Operation for CustomerLimitOp {
    const NAME: &'static str = "AmendCustomerLimit";
    type Params = CustomerLimitParams;
    type Detail = LimitAmendment;

    fn schema() -> ResponseSchema {
        ResponseSchema::xml("AmendCustomerLimitResponse")
    }

    fn render(params: &Self::Params, credentials: &Credentials) -> Payload {
        let request = Element::new("AmendCustomerLimitRequest")
            .field("CustomerId", params.customer_id.as_str())
            .child(
                Element::new("Limit")
                    .field("Type", params.limit_type.as_str())
                    .field("Amount", params.amount.as_str())
                    .field("Currency", params.currency.as_str()),
            )
            .optional_field("EffectiveDate", params.effective_date.as_deref());

        Payload::soap(&SoapEnvelope::new(request).with_credentials(credentials), Self::NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, OutcomeKind};

    #[test]
    fn test_empty_detail_is_success_without_detail() {
        let body = "<Envelope><Body><AmendCustomerLimitResponse>\
                    <Status><Result>Success</Result><Messages><Message>Limit updated</Message></Messages></Status>\
                    <Detail/></AmendCustomerLimitResponse></Body></Envelope>";

        let outcome = classify::<LimitAmendment>(body.as_bytes(), &CustomerLimitOp::schema()).unwrap();

        assert!(outcome.success());
        assert_eq!(outcome.kind(), OutcomeKind::SuccessNoDetail);
        assert_eq!(outcome.messages(), ["Limit updated"]);
    }

    #[test]
    fn test_partial_detail() {
        let body = "<Envelope><Body><AmendCustomerLimitResponse>\
                    <Status><Result>Success</Result></Status>\
                    <Detail><NewLimit>500000.00</NewLimit></Detail>\
                    </AmendCustomerLimitResponse></Body></Envelope>";

        let detail = classify::<LimitAmendment>(body.as_bytes(), &CustomerLimitOp::schema())
            .unwrap()
            .into_detail()
            .unwrap();

        assert_eq!(
            detail,
            LimitAmendment {
                new_limit: Some("500000.00".into()),
                ..LimitAmendment::default()
            }
        );
    }
}
