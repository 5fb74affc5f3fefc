pub mod fallback;
pub mod gateway;
pub mod remote;

pub use fallback::FallbackTranslator;
pub use gateway::{TranslationGateway, Translator};
pub use remote::RemoteTranslator;
