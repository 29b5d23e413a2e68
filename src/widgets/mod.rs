pub mod card;
pub mod form;
pub mod status;

pub use card::{AvatarCard, CardGrid};
pub use form::{AvatarForm, AvatarStyle, FormField, FormOutcome, FormState, TextInput};
pub use status::{EmptyPanel, ErrorPanel, Spinner};
