//! The public contact form.

use std::sync::atomic::AtomicBool;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::json;
use techhub_db::models::contact_message::{ContactMessage, CreateContactMessage};

use crate::backend::Table;
use crate::context::AppContext;
use crate::error::FormError;
use crate::guard::InFlight;
use crate::notify::Notice;
use crate::records::decode;

pub struct ContactForm {
    ctx: AppContext,
    draft: Mutex<CreateContactMessage>,
    submitting: AtomicBool,
}

impl ContactForm {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            draft: Mutex::new(CreateContactMessage::default()),
            submitting: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CreateContactMessage> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn draft(&self) -> CreateContactMessage {
        self.lock().clone()
    }

    pub fn edit(&self, change: impl FnOnce(&mut CreateContactMessage)) {
        change(&mut *self.lock());
    }

    /// Validate and send. The form is cleared only on success.
    pub async fn submit(&self) -> Result<ContactMessage, FormError> {
        let Some(_in_flight) = InFlight::begin(&self.submitting) else {
            return Err(FormError::Busy);
        };

        let draft = self.draft();
        draft.validate()?;

        let payload = json!({
            "name": draft.name.trim(),
            "email": draft.email.trim(),
            "subject": draft.subject.trim(),
            "message": draft.message.trim(),
        });

        let stored = self
            .ctx
            .backend()
            .insert(Table::ContactMessages, payload)
            .await
            .and_then(decode::<ContactMessage>);

        match stored {
            Ok(message) => {
                tracing::info!(message_id = message.id, "Contact message sent");
                *self.lock() = CreateContactMessage::default();
                self.ctx.notify(
                    Notice::success("Message Sent!")
                        .with_description("We'll get back to you soon."),
                );
                Ok(message)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error sending contact message");
                self.ctx.notify(
                    Notice::error("Error")
                        .with_description("Failed to send message. Please try again."),
                );
                Err(FormError::Backend(e))
            }
        }
    }
}
