use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    cli::args::{MalformedPolicy, SummaryFormat},
    models::{Cart, Details, ItemRequest},
    services::{CartService, CartServiceError},
    utils::{
        formatting::{format_duplicate, format_item_added, format_summary, format_summary_json},
        parsing::{is_sentinel, parse_details, parse_discounts, parse_price, InputError},
    },
};

pub const NAME_PROMPT: &str = "Enter item name (or 'done' to finish): ";
pub const PRICE_PROMPT: &str = "Enter item price: ";
pub const DISCOUNTS_PROMPT: &str = "Enter discounts (if any, separated by spaces): ";
pub const DETAILS_PROMPT: &str = "Enter item details (e.g., color=red size=large): ";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Failed to render cart summary: {0}")]
    Summary(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingItemName,
    AwaitingPrice,
    AwaitingDiscounts,
    AwaitingDetails,
    ItemAccepted,
    ItemRejectedDuplicate,
    Finished,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub on_malformed: MalformedPolicy,
    pub summary_format: SummaryFormat,
    pub strict: bool,
}

/// Fields collected for the item currently being entered.
#[derive(Debug, Default)]
struct Draft {
    name: String,
    price: f64,
    discounts: Vec<f64>,
    details: Details,
}

/// One interactive cart: prompts on `output`, reads answers line by line
/// from `input`, and prints the summary once the user types `done` or the
/// input runs out.
pub struct CartSession<R, W> {
    input: R,
    output: W,
    options: SessionOptions,
    service: CartService,
    state: SessionState,
    draft: Draft,
}

impl<R: BufRead, W: Write> CartSession<R, W> {
    pub fn new(input: R, output: W, options: SessionOptions) -> Self {
        Self {
            input,
            output,
            options,
            service: CartService::new(options.strict),
            state: SessionState::AwaitingItemName,
            draft: Draft::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cart(&self) -> &Cart {
        self.service.cart()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Drive the session to `Finished` and print the summary.
    ///
    /// A malformed discount or detail token under [`MalformedPolicy::Abort`]
    /// returns early with [`SessionError::Input`] and prints no summary.
    pub fn run(&mut self) -> Result<(), SessionError> {
        info!(
            "Cart session started (on_malformed={}, format={}, strict={})",
            self.options.on_malformed, self.options.summary_format, self.options.strict
        );

        while self.state != SessionState::Finished {
            let next = self.step()?;
            debug!("Session state {:?} -> {:?}", self.state, next);
            self.state = next;
        }

        self.print_summary()?;
        info!(
            "Cart session finished with {} item(s), total {}",
            self.cart().len(),
            self.cart().total()
        );
        Ok(())
    }

    fn step(&mut self) -> Result<SessionState, SessionError> {
        match self.state {
            SessionState::AwaitingItemName => self.read_item_name(),
            SessionState::AwaitingPrice => self.read_price(),
            SessionState::AwaitingDiscounts => self.read_discounts(),
            SessionState::AwaitingDetails => self.read_details(),
            SessionState::ItemAccepted | SessionState::ItemRejectedDuplicate => {
                Ok(SessionState::AwaitingItemName)
            }
            SessionState::Finished => Ok(SessionState::Finished),
        }
    }

    fn read_item_name(&mut self) -> Result<SessionState, SessionError> {
        let Some(line) = self.prompt(NAME_PROMPT)? else {
            return Ok(SessionState::Finished);
        };

        if is_sentinel(&line) {
            return Ok(SessionState::Finished);
        }

        self.draft = Draft {
            name: line.trim().to_string(),
            ..Draft::default()
        };
        Ok(SessionState::AwaitingPrice)
    }

    fn read_price(&mut self) -> Result<SessionState, SessionError> {
        let Some(line) = self.prompt(PRICE_PROMPT)? else {
            return Ok(self.abandon_on_eof());
        };

        match parse_price(&line) {
            Ok(price) => {
                self.draft.price = price;
                Ok(SessionState::AwaitingDiscounts)
            }
            Err(e) => {
                warn!("Rejected price {:?} for '{}'", line.trim(), self.draft.name);
                writeln!(self.output, "{}", e)?;
                Ok(SessionState::AwaitingItemName)
            }
        }
    }

    fn read_discounts(&mut self) -> Result<SessionState, SessionError> {
        let Some(line) = self.prompt(DISCOUNTS_PROMPT)? else {
            return Ok(self.abandon_on_eof());
        };

        match parse_discounts(&line) {
            Ok(discounts) => {
                self.draft.discounts = discounts;
                Ok(SessionState::AwaitingDetails)
            }
            Err(e) => self.reject_malformed(e),
        }
    }

    fn read_details(&mut self) -> Result<SessionState, SessionError> {
        let Some(line) = self.prompt(DETAILS_PROMPT)? else {
            return Ok(self.abandon_on_eof());
        };

        match parse_details(&line) {
            Ok(details) => {
                self.draft.details = details;
                self.commit_draft()
            }
            Err(e) => self.reject_malformed(e),
        }
    }

    fn commit_draft(&mut self) -> Result<SessionState, SessionError> {
        let Draft {
            name,
            price,
            discounts,
            details,
        } = std::mem::take(&mut self.draft);

        let request = ItemRequest::new(name, price)
            .with_discounts(discounts)
            .with_details(details);

        match self.service.add_item(request) {
            Ok(item) => {
                writeln!(self.output, "{}", format_item_added(item))?;
                Ok(SessionState::ItemAccepted)
            }
            Err(CartServiceError::DuplicateItem { name }) => {
                writeln!(self.output, "{}", format_duplicate(&name))?;
                Ok(SessionState::ItemRejectedDuplicate)
            }
            Err(e @ CartServiceError::ValidationError { .. }) => {
                writeln!(self.output, "{}", e)?;
                Ok(SessionState::AwaitingItemName)
            }
        }
    }

    fn reject_malformed(&mut self, e: InputError) -> Result<SessionState, SessionError> {
        match self.options.on_malformed {
            MalformedPolicy::Abort => {
                error!("Aborting cart session: {}", e);
                Err(e.into())
            }
            MalformedPolicy::Skip => {
                warn!("Dropping item '{}': {}", self.draft.name, e);
                writeln!(self.output, "{}", e)?;
                self.draft = Draft::default();
                Ok(SessionState::AwaitingItemName)
            }
        }
    }

    fn abandon_on_eof(&mut self) -> SessionState {
        warn!(
            "Input closed while entering '{}'; item discarded",
            self.draft.name
        );
        self.draft = Draft::default();
        SessionState::Finished
    }

    /// Write `message` without a newline and read one answer.
    /// Returns `None` once the input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, SessionError> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("End of input reached");
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn print_summary(&mut self) -> Result<(), SessionError> {
        let cart = self.service.cart();
        match self.options.summary_format {
            SummaryFormat::Text => write!(self.output, "{}", format_summary(cart))?,
            SummaryFormat::Json => writeln!(self.output, "{}", format_summary_json(cart)?)?,
        }
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> CartSession<Cursor<Vec<u8>>, Vec<u8>> {
        CartSession::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            SessionOptions::default(),
        )
    }

    #[test]
    fn test_starts_awaiting_item_name() {
        let session = session("");
        assert_eq!(session.state(), SessionState::AwaitingItemName);
    }

    #[test]
    fn test_sentinel_finishes() {
        let mut session = session("  DoNe \n");
        session.run().unwrap();
        assert_eq!(session.state(), SessionState::Finished);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_walks_states_for_one_item() {
        let mut session = session("Book\n20\n10 50\ncolor=red\n");

        let mut seen = vec![session.state()];
        while session.state() != SessionState::Finished {
            let next = session.step().unwrap();
            session.state = next;
            seen.push(next);
        }

        assert_eq!(
            seen,
            vec![
                SessionState::AwaitingItemName,
                SessionState::AwaitingPrice,
                SessionState::AwaitingDiscounts,
                SessionState::AwaitingDetails,
                SessionState::ItemAccepted,
                SessionState::AwaitingItemName,
                SessionState::Finished,
            ]
        );
        assert_eq!(session.cart().len(), 1);
    }

    #[test]
    fn test_duplicate_goes_through_rejected_state() {
        let mut session = session("Pen\n5\n\n\nPen\n10\n\n\n");

        let mut seen = Vec::new();
        while session.state() != SessionState::Finished {
            let next = session.step().unwrap();
            session.state = next;
            seen.push(next);
        }

        assert!(seen.contains(&SessionState::ItemRejectedDuplicate));
        assert_eq!(session.cart().len(), 1);
    }

    #[test]
    fn test_eof_mid_item_discards_it() {
        let mut session = session("Pen\n5\n");
        session.run().unwrap();
        assert!(session.cart().is_empty());

        let output = String::from_utf8(session.into_output()).unwrap();
        assert!(output.ends_with("\n--- Cart Summary ---\nTotal Cost: $0.0\n"));
    }
}
