//! # Paginated Listings
//!
//! GitHub splits listings into pages chained by `Link: <...>; rel="next"`
//! headers. [`Pages`] walks that chain one request at a time, and only when
//! asked, so callers can stop early or aggregate everything with
//! [`Pages::collect_all`]. Items keep the order the remote returned them in.

use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::client::GitHubClient;
use crate::error::ApiError;
use crate::executor::{decode, parse_next_link};
use crate::request::RequestDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
  Start,
  Next(Url),
  Done,
}

/// A lazy, restartable sequence of result pages
#[derive(Debug)]
pub struct Pages<'a, T> {
  client: &'a GitHubClient,
  first: RequestDescriptor,
  cursor: Cursor,
  pages_fetched: usize,
  _item: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> Pages<'a, T> {
  pub(crate) fn new(client: &'a GitHubClient, first: RequestDescriptor) -> Self {
    Self {
      client,
      first,
      cursor: Cursor::Start,
      pages_fetched: 0,
      _item: PhantomData,
    }
  }

  /// Fetch the next page, or `None` once the last page has been read.
  ///
  /// A failed fetch leaves the cursor where it was, so calling again
  /// retries the same page.
  pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, ApiError> {
    let url = match &self.cursor {
      Cursor::Start => self.client.url_for(&self.first)?,
      Cursor::Next(url) => url.clone(),
      Cursor::Done => return Ok(None),
    };

    let response = self.client.send(&Method::GET, &url, None).await?;
    let next = parse_next_link(response.headers())
      .map(|link| {
        url
          .join(&link)
          .map_err(|e| ApiError::InvalidRequest(format!("Invalid pagination link '{link}': {e}")))
      })
      .transpose()?;
    let items: Vec<T> = decode(&url, response).await?;

    self.pages_fetched += 1;
    self.cursor = match next {
      Some(next_url) => {
        debug!("Page {} has a next page: {}", self.pages_fetched, next_url);
        Cursor::Next(next_url)
      }
      None => {
        debug!("Page {} is the last page", self.pages_fetched);
        Cursor::Done
      }
    };

    Ok(Some(items))
  }

  /// Start over from the first page on the next call to [`Self::next_page`]
  pub fn restart(&mut self) {
    self.cursor = Cursor::Start;
    self.pages_fetched = 0;
  }

  pub fn is_exhausted(&self) -> bool {
    self.cursor == Cursor::Done
  }

  /// Number of pages fetched since the start (or the last restart)
  pub fn pages_fetched(&self) -> usize {
    self.pages_fetched
  }

  /// Fetch every remaining page and concatenate the items in page order.
  pub async fn collect_all(mut self) -> Result<Vec<T>, ApiError> {
    let mut all = Vec::new();
    while let Some(page) = self.next_page().await? {
      all.extend(page);
    }
    debug!("Collected {} items across {} pages", all.len(), self.pages_fetched);
    Ok(all)
  }
}
