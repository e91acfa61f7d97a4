use beancount_parser_lima::{
    self as parser, BeancountParser, BeancountSources, ParseError, ParseSuccess, Spanned,
};
use color_eyre::eyre::{eyre, Result, WrapErr};
use dividend_allocation::{HarvestError, PositionQuery, PositionRow, TXNID_KEY};
use rust_decimal::Decimal;
use std::{
    collections::{BTreeMap, HashSet},
    io::Write,
    path::Path,
};
use time::Date;

/// The parts of an existing Beancount ledger needed for posting dividends.
///
/// Everything is owned, so the ledger outlives the parsed sources.
#[derive(Default, Debug)]
pub(crate) struct Ledger {
    postings: Vec<LedgerPosting>,
    txnids: HashSet<String>,
}

#[derive(Debug)]
struct LedgerPosting {
    date: Date,
    account: String,
    currency: String,
    units: Decimal,
}

impl Ledger {
    pub(crate) fn load_from<W>(path: &Path, error_w: W) -> Result<Self>
    where
        W: Write + Copy,
    {
        let sources =
            BeancountSources::try_from(path).wrap_err(format!("failed to read {path:?}"))?;

        Self::load_from_sources(&sources, error_w)
    }

    pub(crate) fn load_from_sources<W>(sources: &BeancountSources, error_w: W) -> Result<Self>
    where
        W: Write + Copy,
    {
        let parser = BeancountParser::new(sources);

        match parser.parse() {
            Ok(ParseSuccess {
                directives,
                options: _,
                plugins: _,
                warnings,
            }) => {
                sources.write_errors_or_warnings(error_w, warnings)?;

                let mut ledger = Ledger::default();
                for directive in &directives {
                    ledger.directive(directive);
                }

                tracing::debug!(
                    "loaded {} postings and {} transaction ids",
                    ledger.postings.len(),
                    ledger.txnids.len()
                );

                Ok(ledger)
            }

            Err(ParseError { errors, warnings }) => {
                sources.write_errors_or_warnings(error_w, errors)?;
                sources.write_errors_or_warnings(error_w, warnings)?;
                Err(eyre!("parse error"))
            }
        }
    }

    /// Transaction ids found in the ledger's metadata, marking what has already been posted.
    pub(crate) fn txnids(&self) -> impl Iterator<Item = &str> {
        self.txnids.iter().map(String::as_str)
    }

    fn directive(&mut self, directive: &Spanned<parser::Directive<'_>>) {
        use parser::DirectiveVariant::*;

        if let Transaction(transaction) = directive.variant() {
            self.transaction(transaction, directive)
        }
    }

    fn transaction(
        &mut self,
        transaction: &parser::Transaction<'_>,
        directive: &Spanned<parser::Directive<'_>>,
    ) {
        let date = *directive.date().item();

        // TXNID_KEY is a valid metadata key
        if let Some(txnid) = directive
            .metadata()
            .key_value(parser::Key::try_from(TXNID_KEY).unwrap())
        {
            if let parser::MetaValue::Simple(parser::SimpleValue::String(txnid)) = txnid.item() {
                self.txnids.insert(txnid.to_string());
            }
        }

        // postings without an amount are left to interpolation, and can't hold a position we care about
        for posting in transaction.postings() {
            if let (Some(amount), Some(currency)) = (posting.amount(), posting.currency()) {
                let account: &str = posting.account().item().as_ref();
                let currency: &str = currency.item().as_ref();

                self.postings.push(LedgerPosting {
                    date,
                    account: account.to_string(),
                    currency: currency.to_string(),
                    units: amount.item().value(),
                });
            }
        }
    }
}

impl PositionQuery for Ledger {
    fn positions(&self, asset: &str, before: Date) -> Result<Vec<PositionRow>, HarvestError> {
        let mut by_account = BTreeMap::<&str, Decimal>::default();

        for posting in self
            .postings
            .iter()
            .filter(|posting| posting.currency == asset && posting.date < before)
        {
            *by_account.entry(posting.account.as_str()).or_default() += posting.units;
        }

        Ok(by_account.into_iter().map(Into::into).collect())
    }
}
