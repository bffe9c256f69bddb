//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_listing;
pub mod create_user;
pub mod create_user_session;
pub mod delete_listing;
pub mod record;
pub mod subscribe;
pub mod update_listing;
pub mod update_site_stats;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_listing::CreateListing, create_user::CreateUser,
    create_user_session::CreateUserSession, delete_listing::DeleteListing,
    record::{CreateRecord, DeleteRecord, ReplaceRecord},
    subscribe::Subscribe, update_listing::UpdateListing,
    update_site_stats::UpdateSiteStats,
};
