pub mod error;
pub mod listing;
pub mod response;
pub mod urls;

pub use error::{ClientError, ClientResult};
pub use listing::{ContentApi, HttpContentApi};
pub use response::{ApiEnvelope, ResultPage};
pub use urls::ApiUrls;
