use itertools::Itertools;
use std::collections::HashMap;

use crate::core::N_AGE_CLASSES;
use crate::core::tables::{
    ContactPattern, ContactRate, DeathTable, Probabilities, YearlyTable,
};
use crate::errors::TableError;

type Result<T> = std::result::Result<T, TableError>;

pub trait TableIO: Sized {
    fn read(path: &str) -> Result<Self>;
}

/// Read a headerless file of comma separated numbers into rows, each with the line number it
/// was read from.
///
/// Rows may have different lengths. Empty lines are skipped.
pub fn read_numbered_rows(path: &str) -> Result<Vec<(usize, Vec<f64>)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|err| TableError::CsvError(path.to_string(), err))?;

    reader
        .records()
        .enumerate()
        .map(|(idx, record)| -> Result<(usize, Vec<f64>)> {
            let record = record.map_err(|err| TableError::CsvError(path.to_string(), err))?;
            let line = record
                .position()
                .map_or(idx + 1, |position| position.line() as usize);
            let values = record
                .iter()
                .map(|field| {
                    field.parse::<f64>().map_err(|_| {
                        TableError::ParseError(path.to_string(), line, field.to_string())
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            Ok((line, values))
        })
        .collect()
}

/// Read a headerless file of comma separated numbers into rows.
pub fn read_rows(path: &str) -> Result<Vec<Vec<f64>>> {
    Ok(read_numbered_rows(path)?
        .into_iter()
        .map(|(_, row)| row)
        .collect())
}

/// Read a file with one number per line.
pub fn read_column(path: &str) -> Result<Vec<f64>> {
    read_numbered_rows(path)?
        .into_iter()
        .map(|(line, row)| match row.as_slice() {
            [value] => Ok(*value),
            _ => Err(TableError::ParseError(
                path.to_string(),
                line,
                row.iter().join(","),
            )),
        })
        .collect()
}

/// Read the first `n` values of a one-number-per-line file.
pub fn read_constants(path: &str, n: usize) -> Result<Vec<f64>> {
    let values = read_column(path)?;
    if values.len() < n {
        return Err(TableError::MissingValue(
            path.to_string(),
            format!("{} of {n} values", n - values.len()),
        ));
    }
    Ok(values.into_iter().take(n).collect())
}

impl TableIO for YearlyTable {
    fn read(path: &str) -> Result<Self> {
        let values = read_column(path)?;
        log::debug!("#### {path} ####");
        for (year, value) in values.iter().enumerate() {
            log::debug!("{year}\t{value}");
        }
        Ok(values.into())
    }
}

impl TableIO for DeathTable {
    /// Each line holds the yearly rates of one age class, starting with `a1`.
    fn read(path: &str) -> Result<Self> {
        log::debug!("#### {path} ####");
        let table: HashMap<String, YearlyTable> = read_rows(path)?
            .into_iter()
            .enumerate()
            .map(|(idx, rates)| {
                let age_class = format!("a{}", idx + 1);
                log::debug!("{age_class}: {}", rates.iter().join(" | "));
                (age_class, YearlyTable::from(rates))
            })
            .collect();
        Ok(table.into())
    }
}

impl TableIO for ContactPattern {
    /// Row `j` holds the contact rates of susceptibles in age class `j` with infectants of each
    /// age class. Keys are laid out row by row, which is also their matching priority.
    fn read(path: &str) -> Result<Self> {
        log::debug!("#### {path} ####");
        let mut contacts = Vec::new();
        for (row, (line, rates)) in read_numbered_rows(path)?.into_iter().enumerate() {
            if rates.len() > N_AGE_CLASSES {
                return Err(TableError::ParseError(
                    path.to_string(),
                    line,
                    rates.iter().join(","),
                ));
            }
            log::debug!("a{} | {}", row + 1, rates.iter().join(" | "));
            for (col, rate) in rates.into_iter().enumerate() {
                contacts.push(ContactRate::new(
                    format!("a_a{}_b_a{}", row + 1, col + 1),
                    rate,
                )?);
            }
        }
        Ok(contacts.into())
    }
}

impl TableIO for Probabilities {
    /// Four lines: boost, primary infection, secondary infection and vaccine failure.
    fn read(path: &str) -> Result<Self> {
        let values = read_constants(path, 4)?;
        let probabilities = Probabilities {
            boost: values[0],
            primary: values[1],
            secondary: values[2],
            vaccine_failure: values[3],
        };
        log::debug!("{path}: {probabilities:?}");
        Ok(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(name: &str, content: &str) -> String {
        let dir = std::env::temp_dir().join("epirates_readwrite_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn read_yearly_table() {
        let path = write_fixture("b_rates", "0.011\n0.012\n0.013\n");
        let table = YearlyTable::read(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), Some(0.011));
        assert_eq!(table.get(2), Some(0.013));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn read_death_table() {
        let path = write_fixture("d_rates", "0.1,0.2,0.3\n0.4, 0.5\n0.6\n");
        let table = DeathTable::read(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table["a1"].get(2), Some(0.3));
        assert_eq!(table["a2"].get(1), Some(0.5));
        assert_eq!(table["a3"].get(0), Some(0.6));
        assert_eq!(table["a3"].get(1), None);
    }

    #[test]
    fn read_contact_pattern() {
        let path = write_fixture("c_rates", "1,2,3\n4,5,6\n7,8,9\n");
        let contacts = ContactPattern::read(&path).unwrap();
        assert_eq!(contacts.len(), 9);
        assert_eq!(contacts[0].key, "a_a1_b_a1");
        assert_eq!(contacts[1].key, "a_a1_b_a2");
        assert_eq!(contacts[5].key, "a_a2_b_a3");
        assert_eq!(contacts[5].rate, 6.);
        assert_eq!(contacts[8].key, "a_a3_b_a3");
    }

    #[test]
    fn too_many_contact_columns() {
        let path = write_fixture("c_rates_wide", "1,2,3,4\n");
        assert!(matches!(
            ContactPattern::read(&path),
            Err(TableError::ParseError(_, 1, _))
        ));
    }

    #[test]
    fn read_probabilities() {
        let path = write_fixture("probabilities", "0.1\n0.2\n0.3\n0.04\n");
        let probabilities = Probabilities::read(&path).unwrap();
        assert_eq!(probabilities.boost, 0.1);
        assert_eq!(probabilities.primary, 0.2);
        assert_eq!(probabilities.secondary, 0.3);
        assert_eq!(probabilities.vaccine_failure, 0.04);
    }

    #[test]
    fn missing_probabilities() {
        let path = write_fixture("probabilities_short", "0.1\n0.2\n");
        assert!(matches!(
            Probabilities::read(&path),
            Err(TableError::MissingValue(_, _))
        ));
    }

    #[test]
    fn malformed_value() {
        let path = write_fixture("v_rates_bad", "0.5\nabc\n");
        assert!(matches!(
            YearlyTable::read(&path),
            Err(TableError::ParseError(_, 2, _))
        ));
    }

    #[test]
    fn error_lines_count_blank_lines() {
        let path = write_fixture("v_rates_gaps", "0.5\n\n\n0.6\nabc\n");
        assert!(matches!(
            YearlyTable::read(&path),
            Err(TableError::ParseError(_, 5, _))
        ));

        let path = write_fixture("c_rates_gaps", "1,2,3\n\n4,5,6,7\n");
        assert!(matches!(
            ContactPattern::read(&path),
            Err(TableError::ParseError(_, 3, _))
        ));
    }

    #[test]
    fn missing_file() {
        let dir = std::env::temp_dir().join("epirates_readwrite_test");
        let path = dir.join("does_not_exist");
        assert!(matches!(
            YearlyTable::read(path.to_str().unwrap()),
            Err(TableError::CsvError(_, _))
        ));
    }
}
