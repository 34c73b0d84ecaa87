// Adapters layer: concrete clients for the external providers behind the
// domain ports (payment gateway, email, SMS).

pub mod paystack;
pub mod sendgrid;
pub mod twilio;

pub use paystack::PaystackClient;
pub use sendgrid::SendgridMailer;
pub use twilio::TwilioSms;
