//! Domain models for the hotel site.
//!
//! Each model owns its persisted shape, the raw request body it is created
//! from, and the validation rules between the two.

mod form;
pub mod message;
pub mod testimonial;

pub use message::{
    ContactForm, Message, MessagePatch, MessagePatchForm, MessageStats, NewMessage,
};
pub use testimonial::{NewTestimonial, Testimonial, TestimonialForm, TestimonialStats};
