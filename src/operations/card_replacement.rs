//! Debit card replacement.

use serde::{Deserialize, Serialize};

use crate::classify::ResponseSchema;
use crate::config::Credentials;
use crate::envelope::{Element, SoapEnvelope};
use crate::operation::{Operation, Payload};

/// Why a card is being replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementReason {
    #[default]
    Lost,
    Stolen,
    Damaged,
    Expired,
}

impl ReplacementReason {
    pub fn code(&self) -> &'static str {
        match self {
            ReplacementReason::Lost => "LOST",
            ReplacementReason::Stolen => "STOLEN",
            ReplacementReason::Damaged => "DAMAGED",
            ReplacementReason::Expired => "EXPIRED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardReplacementParams {
    pub account_number: String,
    pub card_number: String,
    pub reason: ReplacementReason,
    /// Branch that will hand over the new card. Omitted means home branch.
    pub collection_branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardReplacement {
    pub account_number: String,
    pub card_type: String,
    #[serde(default)]
    pub new_card_number: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

pub struct CardReplacementOp;

impl Operation for CardReplacementOp {
    const NAME: &'static str = "ReplaceCard";
    type Params = CardReplacementParams;
    type Detail = CardReplacement;

    fn schema() -> ResponseSchema {
        ResponseSchema::xml("ReplaceCardResponse")
    }

    fn render(params: &Self::Params, credentials: &Credentials) -> Payload {
        let request = Element::new("ReplaceCardRequest")
            .field("AccountNumber", params.account_number.as_str())
            .field("CardNumber", params.card_number.as_str())
            .field("Reason", params.reason.code())
            .optional_field("CollectionBranch", params.collection_branch.as_deref());

        Payload::soap(&SoapEnvelope::new(request).with_credentials(credentials), Self::NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, OutcomeKind};
    use url::Url;

    fn params() -> CardReplacementParams {
        CardReplacementParams {
            account_number: "1000000006924".into(),
            card_number: "5078********1234".into(),
            reason: ReplacementReason::Damaged,
            collection_branch: None,
        }
    }

    #[test]
    fn test_render() {
        let credentials = Credentials::new("teller", "secret", Url::parse("https://bank.example.com/ws").unwrap());
        let payload = CardReplacementOp::render(&params(), &credentials);

        assert_eq!(payload.soap_action.as_deref(), Some("ReplaceCard"));
        assert!(payload.body.contains(
            "<bank:ReplaceCardRequest><bank:AccountNumber>1000000006924</bank:AccountNumber>\
             <bank:CardNumber>5078********1234</bank:CardNumber><bank:Reason>DAMAGED</bank:Reason>\
             </bank:ReplaceCardRequest>"
        ));
        assert_eq!(payload, CardReplacementOp::render(&params(), &credentials));
    }

    #[test]
    fn test_success_detail() {
        let body = r#"<?xml version="1.0"?>
            <soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
              <soap:Body>
                <ReplaceCardResponse>
                  <Status><Result>Success</Result><TransactionId>TX-88</TransactionId></Status>
                  <Detail><AccountNumber>1000000006924</AccountNumber><CardType>VIEL</CardType></Detail>
                </ReplaceCardResponse>
              </soap:Body>
            </soap:Envelope>"#;

        let outcome = classify::<CardReplacement>(body.as_bytes(), &CardReplacementOp::schema()).unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::SuccessWithDetail);
        assert_eq!(outcome.transaction_id(), Some("TX-88"));
        let detail = outcome.detail().unwrap();
        assert_eq!(detail.account_number, "1000000006924");
        assert_eq!(detail.card_type, "VIEL");
        assert_eq!(detail.new_card_number, None);
    }
}
