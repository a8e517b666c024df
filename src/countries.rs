use std::{collections::HashSet, fs::File, io::Read, path::Path};

use anyhow::Context;

const PHONE_CODE_COLUMN: &str = "phone_code";

/// Reference set of country phone codes loaded from a CSV table.
#[derive(Debug, Default)]
pub struct CountryCodes {
    codes: HashSet<String>,
}

impl CountryCodes {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("open country codes table {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("read country codes table {}", path.display()))
    }

    /// Reads the `phone_code` column. Headers and cells are whitespace-trimmed, blank cells skipped.
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let column = rdr
            .headers()
            .context("read csv header")?
            .iter()
            .position(|h| h == PHONE_CODE_COLUMN)
            .with_context(|| format!("missing `{}` column", PHONE_CODE_COLUMN))?;

        let mut codes = HashSet::new();
        for record in rdr.records() {
            let record = record.context("read csv record")?;
            if let Some(code) = record.get(column).filter(|c| !c.is_empty()) {
                codes.insert(code.to_string());
            }
        }
        Ok(Self { codes })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }
}

impl<S: Into<String>> FromIterator<S> for CountryCodes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}
