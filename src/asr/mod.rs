pub mod interface;
pub mod openai;
pub mod temp_file;

pub use interface::{ASRInterface, ASRResponse, TranscriptionError};
pub use openai::OpenAITranscriber;
pub use temp_file::TempAudioFile;
