//! Asynchronous sign-up submission handler
//!
//! One unit of async work per submit: a fixed-duration delay stands in for
//! the network round-trip. The demo default deterministically rejects with a
//! duplicate-email error; when sign-ups are accepted the validated data is
//! logged as JSON.

use std::time::Duration;

use tracing::{debug, info};

use crate::errors::SubmitError;
use crate::schema::SignupData;

/// Process one validated sign-up. No retry policy: a single attempt per
/// submit. Rejections are returned as typed errors for the form controller
/// to display; they are never allowed to escape the submit lifecycle.
pub async fn process_signup(
    data: SignupData,
    delay: Duration,
    accept: bool,
) -> Result<(), SubmitError> {
    debug!("processing sign-up for {}", data.email);

    // Simulated network round-trip.
    tokio::time::sleep(delay).await;

    if !accept {
        return Err(SubmitError::EmailTaken);
    }

    let record = serde_json::to_string(&data.record())?;
    info!("sign-up accepted: {}", record);
    Ok(())
}
