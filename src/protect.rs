use std::error::Error;

use anyhow::Result;
use log::{error, info};

/// How a protected region finished
#[derive(Debug, PartialEq)]
pub enum Outcome<T> {
    /// Region ran to completion
    Completed(T),
    /// Region failed with the recoverable kind and the handler ran instead
    Recovered,
}

/// Run `region`, recovering failures of kind `E` with `handler`, then always run `cleanup`
///
/// A failure of any other kind abandons the region, still runs `cleanup`, and is then
/// returned unchanged. If `cleanup` itself fails after the region failed, the region's error
/// wins and the cleanup error is only logged.
pub fn protect<E, T, R, H, C>(region: R, handler: H, cleanup: C) -> Result<Outcome<T>>
where
    E: Error + Send + Sync + 'static,
    R: FnOnce() -> Result<T>,
    H: FnOnce(&E) -> Result<()>,
    C: FnOnce() -> Result<()>,
{
    let res = match region() {
        Ok(v) => Ok(Outcome::Completed(v)),
        Err(e) => match e.downcast::<E>() {
            Ok(kind) => {
                info!("Recovered from '{}'", kind);
                handler(&kind).map(|_| Outcome::Recovered)
            }
            Err(e) => Err(e),
        },
    };

    match (res, cleanup()) {
        (Ok(outcome), Ok(())) => Ok(outcome),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup_err)) => {
            error!("Cleanup failed after '{}': {}", e, cleanup_err);
            Err(e)
        }
    }
}

#[cfg(test)]
use std::cell::RefCell;

#[cfg(test)]
use anyhow::bail;

#[cfg(test)]
use crate::errors::{DivideByZero, IndexError};

#[test]
fn test_recovered() {
    let trace = RefCell::new(Vec::new());

    let outcome = protect::<DivideByZero, _, _, _, _>(
        || {
            trace.borrow_mut().push("region");
            Err(DivideByZero.into())
        },
        |_| {
            trace.borrow_mut().push("handler");
            Ok(())
        },
        || {
            trace.borrow_mut().push("cleanup");
            Ok(())
        },
    )
    .expect("should have recovered");

    assert_eq!(outcome, Outcome::<()>::Recovered);
    assert_eq!(*trace.borrow(), vec!["region", "handler", "cleanup"]);
}

#[test]
fn test_completed() {
    let trace = RefCell::new(Vec::new());

    let outcome = protect::<DivideByZero, _, _, _, _>(
        || Ok(5),
        |_| {
            trace.borrow_mut().push("handler");
            Ok(())
        },
        || {
            trace.borrow_mut().push("cleanup");
            Ok(())
        },
    )
    .expect("region should complete");

    assert_eq!(outcome, Outcome::Completed(5));
    assert_eq!(*trace.borrow(), vec!["cleanup"]);
}

#[test]
fn test_other_kind_propagates() {
    let trace = RefCell::new(Vec::new());

    let err = protect::<DivideByZero, (), _, _, _>(
        || Err(IndexError { index: 7, len: 3 }.into()),
        |_| {
            trace.borrow_mut().push("handler");
            Ok(())
        },
        || {
            trace.borrow_mut().push("cleanup");
            Ok(())
        },
    )
    .unwrap_err();

    assert!(err.is::<IndexError>());
    assert_eq!(*trace.borrow(), vec!["cleanup"]);
}

#[test]
fn test_region_error_beats_cleanup_error() {
    let err = protect::<DivideByZero, (), _, _, _>(
        || bail!("region broke"),
        |_| Ok(()),
        || bail!("cleanup broke"),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "region broke");

    let err = protect::<DivideByZero, _, _, _, _>(|| Ok(1), |_| Ok(()), || bail!("cleanup broke"))
        .unwrap_err();
    assert_eq!(err.to_string(), "cleanup broke");
}
