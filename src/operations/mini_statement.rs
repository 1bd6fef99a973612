//! Mini-statement: the last few postings on an account.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::classify::de::one_or_many;
use crate::classify::ResponseSchema;
use crate::config::Credentials;
use crate::envelope::{Element, SoapEnvelope};
use crate::operation::{Operation, Payload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniStatementParams {
    pub account_number: String,
    /// Number of postings requested; the core may return fewer.
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MiniStatement {
    pub account_number: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub available_balance: Option<String>,
    #[serde(default, deserialize_with = "transaction_list")]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub amount: String,
    /// `D` for debit, `C` for credit.
    #[serde(rename = "DrCr")]
    pub direction: String,
    #[serde(default)]
    pub reference: Option<String>,
}

/// `<Transactions>` wraps zero or more `<Transaction>` elements.
fn transaction_list<'de, D>(deserializer: D) -> Result<Vec<Transaction>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct List {
        #[serde(rename = "Transaction", default, deserialize_with = "one_or_many")]
        entries: Vec<Transaction>,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Section {
        List(List),
        Blank(IgnoredAny),
    }

    match Option::<Section>::deserialize(deserializer)? {
        Some(Section::List(list)) => Ok(list.entries),
        Some(Section::Blank(_)) | None => Ok(Vec::new()),
    }
}

pub struct MiniStatementOp;

impl Operation for MiniStatementOp {
    const NAME: &'static str = "GetMiniStatement";
    type Params = MiniStatementParams;
    type Detail = MiniStatement;

    fn schema() -> ResponseSchema {
        ResponseSchema::xml("GetMiniStatementResponse")
    }

    fn render(params: &Self::Params, credentials: &Credentials) -> Payload {
        let request = Element::new("GetMiniStatementRequest")
            .field("AccountNumber", params.account_number.as_str())
            .field("NumberOfTransactions", params.count.to_string());

        Payload::soap(&SoapEnvelope::new(request).with_credentials(credentials), Self::NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn response(transactions: &str) -> String {
        format!(
            "<Envelope><Body><GetMiniStatementResponse>\
             <Status><Result>Success</Result></Status>\
             <Detail><AccountNumber>0012345678</AccountNumber><Currency>NGN</Currency>\
             {transactions}</Detail></GetMiniStatementResponse></Body></Envelope>"
        )
    }

    fn entry(reference: &str) -> String {
        format!(
            "<Transaction><Date>2024-03-01</Date><Description>POS</Description>\
             <Amount>1500.00</Amount><DrCr>D</DrCr><Reference>{reference}</Reference></Transaction>"
        )
    }

    #[test]
    fn test_many_transactions() {
        let body = response(&format!("<Transactions>{}{}</Transactions>", entry("R1"), entry("R2")));
        let detail = classify::<MiniStatement>(body.as_bytes(), &MiniStatementOp::schema())
            .unwrap()
            .into_detail()
            .unwrap();

        assert_eq!(detail.transactions.len(), 2);
        assert_eq!(detail.transactions[1].reference.as_deref(), Some("R2"));
        assert_eq!(detail.transactions[0].direction, "D");
    }

    #[test]
    fn test_single_and_empty_transaction_lists() {
        let body = response(&format!("<Transactions>{}</Transactions>", entry("R1")));
        let detail = classify::<MiniStatement>(body.as_bytes(), &MiniStatementOp::schema())
            .unwrap()
            .into_detail()
            .unwrap();
        assert_eq!(detail.transactions.len(), 1);

        for transactions in ["<Transactions/>", ""] {
            let body = response(transactions);
            let detail = classify::<MiniStatement>(body.as_bytes(), &MiniStatementOp::schema())
                .unwrap()
                .into_detail()
                .unwrap();
            assert!(detail.transactions.is_empty());
        }
    }

    #[test]
    fn test_render_count() {
        let credentials = Credentials::new("u", "p", url::Url::parse("https://bank.example.com").unwrap());
        let params = MiniStatementParams {
            account_number: "0012345678".into(),
            count: 5,
        };
        let payload = MiniStatementOp::render(&params, &credentials);
        assert!(payload.body.contains("<bank:NumberOfTransactions>5</bank:NumberOfTransactions>"));
    }
}
