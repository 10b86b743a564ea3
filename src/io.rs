use std::{fs::File, io::Read, path::Path};

use crate::error::Result;

/// One transaction per line, items comma separated. Fields are trimmed and
/// empty fields dropped; lines may have any number of items.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for record in reader.records() {
        let record = record?;
        transactions.push(
            record
                .iter()
                .filter(|field| !field.is_empty())
                .map(str::to_owned)
                .collect(),
        );
    }

    Ok(transactions)
}

pub fn read_transactions_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let file = File::open(path).map_err(csv::Error::from)?;
    read_transactions(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn reads_ragged_trimmed_lines() {
        let input = "a, b ,c\nb,c\n d\n";
        let transactions = read_transactions(input.as_bytes()).unwrap();
        assert_eq!(
            transactions,
            vec![vec!["a", "b", "c"], vec!["b", "c"], vec!["d"]]
        );
    }

    #[test]
    fn empty_fields_are_dropped() {
        let transactions = read_transactions("a,,b,\n".as_bytes()).unwrap();
        assert_eq!(transactions, vec![vec!["a", "b"]]);
    }

    #[test]
    fn missing_file_is_a_csv_error() {
        let err = read_transactions_from_path("/nonexistent/transactions.csv").unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }
}
