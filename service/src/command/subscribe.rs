//! [`Command`] for subscribing to the newsletter.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{subscriber, Subscriber},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for subscribing an email to the newsletter.
#[derive(Clone, Debug)]
pub struct Subscribe {
    /// Email to subscribe.
    pub email: String,
}

/// Outcome of a [`Subscribe`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Email was subscribed.
    Subscribed,

    /// Email had been subscribed already.
    AlreadySubscribed,
}

impl<Db> Command<Subscribe> for Service<Db>
where
    Db: for<'e> Database<
            Select<By<Option<Subscriber>, &'e str>>,
            Ok = Option<Subscriber>,
            Err = Traced<database::Error>,
        > + Database<Insert<Subscriber>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Outcome;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: Subscribe) -> Result<Self::Ok, Self::Err> {
        let Subscribe { email } = cmd;

        let existing = self
            .database()
            .execute(Select(By::new(email.as_str())))
            .await
            .map_err(tracerr::wrap!())?;
        if existing.is_some() {
            return Ok(Outcome::AlreadySubscribed);
        }

        let subscriber = Subscriber {
            id: subscriber::Id::new(),
            email,
        };

        match self.database().execute(Insert(subscriber)).await {
            Ok(()) => Ok(Outcome::Subscribed),
            // Lost the race against a concurrent subscription.
            Err(e) if e.as_ref().is_unique_violation(None) => {
                Ok(Outcome::AlreadySubscribed)
            }
            Err(e) => Err(e),
        }
    }
}

/// Error of [`Subscribe`] [`Command`] execution.
pub type ExecutionError = database::Error;
