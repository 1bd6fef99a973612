//! Account opening for an existing customer.

use serde::{Deserialize, Serialize};

use crate::classify::ResponseSchema;
use crate::config::Credentials;
use crate::envelope::{Element, SoapEnvelope};
use crate::operation::{Operation, Payload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreationParams {
    pub customer_id: String,
    pub product_code: String,
    pub currency: String,
    pub branch_code: String,
    pub account_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatedAccount {
    pub account_number: String,
    pub customer_id: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub account_status: Option<String>,
}

pub struct AccountCreationOp;

impl Operation for AccountCreationOp {
    const NAME: &'static str = "CreateAccount";
    type Params = AccountCreationParams;
    type Detail = CreatedAccount;

    fn schema() -> ResponseSchema {
        ResponseSchema::xml("CreateAccountResponse")
    }

    fn render(params: &Self::Params, credentials: &Credentials) -> Payload {
        let request = Element::new("CreateAccountRequest")
            .field("CustomerId", params.customer_id.as_str())
            .field("ProductCode", params.product_code.as_str())
            .field("Currency", params.currency.as_str())
            .field("BranchCode", params.branch_code.as_str())
            .optional_field("AccountTitle", params.account_title.as_deref());

        Payload::soap(&SoapEnvelope::new(request).with_credentials(credentials), Self::NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, OutcomeKind};
    use url::Url;

    #[test]
    fn test_title_is_escaped() {
        let credentials = Credentials::new("u", "p", Url::parse("https://bank.example.com").unwrap());
        let params = AccountCreationParams {
            customer_id: "C-1".into(),
            product_code: "SAV01".into(),
            currency: "NGN".into(),
            branch_code: "001".into(),
            account_title: Some("Ade & Sons <Ltd>".into()),
        };

        let payload = AccountCreationOp::render(&params, &credentials);

        assert!(payload
            .body
            .contains("<bank:AccountTitle>Ade &amp; Sons &lt;Ltd&gt;</bank:AccountTitle>"));
    }

    #[test]
    fn test_rejected_creation() {
        let body = "<Envelope><Body><CreateAccountResponse><Status><Result>Failure</Result>\
                    <Messages><Message>Customer not found</Message></Messages></Status>\
                    <Detail><AccountNumber>x</AccountNumber><CustomerId>C-1</CustomerId></Detail>\
                    </CreateAccountResponse></Body></Envelope>";

        let outcome = classify::<CreatedAccount>(body.as_bytes(), &AccountCreationOp::schema()).unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::BusinessFailure);
        assert_eq!(outcome.messages(), ["Customer not found"]);
        assert!(outcome.detail().is_none());
    }
}
