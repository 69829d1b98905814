//! Completion handlers.
//!
//! Every operation is an `async fn` returning `Result<T, ApiError>`. Callers
//! that also want a callback can attach one with [`Completion::notify`]: the
//! handler sees the same outcome the caller awaits, exactly once, after the
//! operation has fully finished (for listings, after the last page).

use std::future::Future;

use crate::error::ApiError;

/// Attach a completion handler to any API operation
pub trait Completion<T>: Future<Output = Result<T, ApiError>> + Sized {
  /// Run `handler` with the outcome, then hand the outcome back to the caller.
  fn notify<F>(self, handler: F) -> impl Future<Output = Result<T, ApiError>>
  where
    F: FnOnce(Result<&T, &ApiError>),
  {
    async move {
      let outcome = self.await;
      handler(outcome.as_ref());
      outcome
    }
  }

  /// Like [`Completion::notify`], for call sites where the handler is
  /// optional.
  fn notify_opt<F>(self, handler: Option<F>) -> impl Future<Output = Result<T, ApiError>>
  where
    F: FnOnce(Result<&T, &ApiError>),
  {
    async move {
      let outcome = self.await;
      if let Some(handler) = handler {
        handler(outcome.as_ref());
      }
      outcome
    }
  }
}

impl<T, Fut> Completion<T> for Fut where Fut: Future<Output = Result<T, ApiError>> {}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use reqwest::StatusCode;

  use super::*;

  #[tokio::test]
  async fn test_handler_sees_success_once() {
    let calls = RefCell::new(Vec::new());

    let result = async { Ok::<_, ApiError>(42) }
      .notify(|outcome| calls.borrow_mut().push(outcome.copied().ok()))
      .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(*calls.borrow(), vec![Some(42)]);
  }

  #[tokio::test]
  async fn test_handler_sees_same_error() {
    let seen = RefCell::new(None);

    let result = async {
      Err::<u32, _>(ApiError::NotFound {
        message: "Not Found".to_string(),
      })
    }
    .notify(|outcome| *seen.borrow_mut() = outcome.err().and_then(ApiError::status))
    .await;

    assert!(result.unwrap_err().is_not_found());
    assert_eq!(*seen.borrow(), Some(StatusCode::NOT_FOUND));
  }

  #[tokio::test]
  async fn test_missing_handler_is_skipped() {
    let result = async { Ok::<_, ApiError>("done") }
      .notify_opt(None::<fn(Result<&&str, &ApiError>)>)
      .await;
    assert_eq!(result.unwrap(), "done");
  }
}
