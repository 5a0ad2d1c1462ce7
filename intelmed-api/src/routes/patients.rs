/// Patient registration endpoint
///
/// # Endpoint
///
/// ```text
/// POST /patients
/// Content-Type: application/x-www-form-urlencoded
///
/// health_insurance_number=HI123&area=North&address=1+Main+St&firstname=Jane
///   &lastname=Doe&sex=F&phonenumber=555-0100&email=jane%40example.com&password=secret
/// ```
///
/// # Response
///
/// Always `303 See Other`:
///
/// - `Location: <success page>` when the user and patient rows were committed
/// - `Location: <error page>` on any failure, whatever the cause
///
/// The cause is logged under a stable `error_code`; submitted values are not
/// logged. Other methods on the same path get an empty `200 OK` and touch
/// nothing.

use crate::app::AppState;
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Redirect,
    Form,
};
use intelmed_shared::registration::{
    register_patient, FieldError, PatientRegistration, RegistrationError,
};
use tracing::{error, info, warn};

/// Handles a submitted registration form
pub async fn submit_registration(
    State(state): State<AppState>,
    form: Result<Form<PatientRegistration>, FormRejection>,
) -> Redirect {
    let outcome = match form {
        Ok(Form(submission)) => {
            register_patient(state.store.as_ref(), &state.hash_permits, submission).await
        }
        Err(rejection) => Err(RegistrationError::Validation(vec![FieldError::new(
            "form",
            rejection.body_text(),
        )])),
    };

    match outcome {
        Ok(registered) => {
            info!(user_id = registered.user_id, "Patient registered");
            Redirect::to(&state.config.redirects.success_url)
        }
        Err(err) => {
            log_failure(&err);
            Redirect::to(&state.config.redirects.error_url)
        }
    }
}

/// Any method other than POST on the registration path
pub async fn ignore_non_post() -> StatusCode {
    StatusCode::OK
}

fn log_failure(err: &RegistrationError) {
    let error_code = err.code();

    match err {
        RegistrationError::Validation(fields) => {
            let fields: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
            warn!(error_code, ?fields, "Registration rejected: {}", err);
        }
        RegistrationError::Integrity { violation, constraint } => {
            warn!(error_code, %violation, constraint = constraint.as_str(), "Registration rejected by database");
        }
        RegistrationError::Connectivity(_) => {
            error!(error_code, transient = err.is_transient(), "Registration failed: {}", err);
        }
        RegistrationError::Hashing(_) | RegistrationError::Database(_) => {
            error!(error_code, "Registration failed: {}", err);
        }
    }
}
