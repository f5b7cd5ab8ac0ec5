//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod block_composer;
mod chat_factory;
mod config_repository;
mod event_reader;
mod reporter;
mod roster_repository;
mod vcs_factory;

pub use block_composer::BlockComposerAdapter;
pub use chat_factory::ChatFactoryAdapter;
pub use config_repository::JsonConfigRepository;
pub use event_reader::JsonEventReader;
pub use reporter::ConsoleReporter;
pub use roster_repository::JsonRosterRepository;
pub use vcs_factory::VcsFactoryAdapter;
