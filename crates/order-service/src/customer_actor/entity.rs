//! [`ActorEntity`] implementation for [`Customer`].

use super::error::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn validate_email(email: &str) -> Result<(), CustomerError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CustomerError::ValidationError(format!(
            "invalid email: {email}"
        ))),
    }
}

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn id(&self) -> &CustomerId {
        &self.id
    }

    /// Creates a new Customer from creation parameters.
    ///
    /// The name must not be blank and the email needs a local part and a domain.
    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, CustomerError> {
        if params.name.trim().is_empty() {
            return Err(CustomerError::ValidationError("name is empty".into()));
        }
        validate_email(&params.email)?;
        Ok(Self::new(id, params.name, params.email))
    }

    async fn on_update(
        &mut self,
        update: CustomerUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), CustomerError> {
        if let Some(email) = &update.email {
            validate_email(email)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        _action: (),
        _ctx: &Self::Context,
    ) -> Result<(), CustomerError> {
        Ok(())
    }
}
