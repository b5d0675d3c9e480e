use crate::types::{EndpointDraft, EndpointSections, FieldError};

/// Validate the endpoint form against the sections currently shown.
///
/// The required set is rebuilt on every save attempt: a field is required
/// only while its section is visible, so hiding a section strips its
/// requirements. All violations are collected, not just the first.
pub fn validate_endpoint(draft: &EndpointDraft, sections: &EndpointSections) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        push(&mut errors, "name", "endpoint name is required");
    }
    if draft.url.trim().is_empty() {
        push(&mut errors, "url", "endpoint url is required");
    } else if !is_http_url(&draft.url) {
        push(&mut errors, "url", "endpoint url must be http(s)");
    }

    if sections.timeout && draft.http_timeout.is_none() {
        push(&mut errors, "http_timeout", "timeout is required");
    }

    if sections.rate_limit {
        if draft.rate_limit.is_none() {
            push(&mut errors, "rate_limit", "rate limit count is required");
        }
        if draft.rate_limit_duration.is_none() {
            push(
                &mut errors,
                "rate_limit_duration",
                "rate limit duration is required",
            );
        }
    }

    if sections.auth {
        match &draft.authentication {
            Some(auth) => {
                if auth.header_name.trim().is_empty() {
                    push(
                        &mut errors,
                        "authentication.header_name",
                        "auth header name is required",
                    );
                }
                if auth.header_value.trim().is_empty() {
                    push(
                        &mut errors,
                        "authentication.header_value",
                        "auth header value is required",
                    );
                }
            }
            None => push(&mut errors, "authentication", "authentication is required"),
        }
    }

    if sections.notifications {
        let email = draft.support_email.as_deref().unwrap_or("").trim();
        if email.is_empty() {
            push(&mut errors, "support_email", "support email is required");
        } else if !email.contains('@') {
            push(&mut errors, "support_email", "support email is invalid");
        }
    }

    if sections.signature && draft.advanced_signatures.is_none() {
        push(
            &mut errors,
            "advanced_signatures",
            "signature format is required",
        );
    }

    errors
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}

fn push(errors: &mut Vec<FieldError>, field: &str, message: &str) {
    errors.push(FieldError {
        field: field.to_string(),
        message: message.to_string(),
    });
}
