use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::domain::traits::TransactionStream;
use crate::domain::{Amount, Error, Request, TransactionKind};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
    scale: u32,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R, scale: u32) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self {
            reader: Some(rdr),
            scale,
        }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    account: String,
    amount: Option<String>,
}

impl CsvRow {
    fn into_request(self, scale: u32) -> Result<Request, Error> {
        let kind = match self.kind.trim().to_ascii_lowercase().as_str() {
            "register" => {
                return Ok(Request::Register {
                    email: self.account,
                });
            }
            "deposit" => TransactionKind::Deposit,
            "withdraw" | "withdrawal" => TransactionKind::Withdraw,
            other => {
                return Err(Error::Ingestion(format!(
                    "Invalid request type: {}",
                    other
                )));
            }
        };

        let amount = Amount::parse(self.amount.as_deref().unwrap_or_default(), scale)?;

        Ok(Request::Move {
            email: self.account,
            kind,
            amount,
        })
    }
}

impl<R: Read + Send + 'static> TransactionStream for CsvReader<R> {
    type TxStream = Pin<Box<dyn Stream<Item = Result<Request, Error>> + Send>>;

    fn stream(&mut self) -> Self::TxStream {
        // Requests can be streamed once; a drained reader yields nothing.
        let Some(reader) = self.reader.take() else {
            return Box::pin(stream::empty::<Result<Request, Error>>());
        };

        let scale = self.scale;
        let requests = reader.into_deserialize::<CsvRow>().map(move |row| {
            row.map_err(|e| Error::Ingestion(format!("malformed request row: {}", e)))
                .and_then(|row| row.into_request(scale))
        });

        Box::pin(stream::iter(requests))
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[tokio::test]
    async fn parses_requests_and_flags_bad_rows() {
        let input = "type, account, amount\n\
                     register, alice@example.com,\n\
                     deposit, alice@example.com, 100.5\n\
                     withdraw, alice@example.com, 0\n\
                     refund, alice@example.com, 1\n";

        let mut reader = CsvReader::new(input.as_bytes(), Amount::DEFAULT_SCALE);
        let rows: Vec<_> = reader.stream().collect().await;

        assert_eq!(rows.len(), 4);
        assert!(matches!(
            &rows[0],
            Ok(Request::Register { email }) if email == "alice@example.com"
        ));
        assert!(matches!(
            &rows[1],
            Ok(Request::Move { kind: TransactionKind::Deposit, amount, .. })
                if amount.value() == rust_decimal::Decimal::new(1005, 1)
        ));
        assert!(matches!(&rows[2], Err(Error::InvalidAmount(_))));
        assert!(matches!(&rows[3], Err(Error::Ingestion(_))));

        // A second call yields nothing.
        assert!(reader.stream().next().await.is_none());
    }
}
