//! Domain entities.

pub mod contact;
pub mod listing;
pub mod review;
pub mod service_request;
pub mod site_stats;
pub mod subscriber;
pub mod testimonial;
pub mod user;

pub use self::{
    contact::Contact, listing::Listing, review::Review,
    service_request::ServiceRequest, site_stats::SiteStats,
    subscriber::Subscriber, testimonial::Testimonial, user::User,
};
