//! Puzzle input download
//!
//! A small blocking client that fetches the personalised input for a given
//! year and day using the session cookie of a logged-in user. TLS goes
//! through rustls; redirects are never followed, so an expired session shows
//! up as an error instead of a login page.
//!
//! # Example
//!
//! ```no_run
//! use sleigh_http::InputClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InputClient::new()?;
//! let input = client.get_input(2018, 9, "your_session_cookie_here")?;
//! println!("{} bytes", input.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{DEFAULT_BASE_URL, InputClient, InputClientBuilder};
pub use error::FetchError;
