//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::reconcile_review::ReconcileReviewUseCase;
use crate::infrastructure::adapters::{
    BlockComposerAdapter, ChatFactoryAdapter, ConsoleReporter, JsonConfigRepository,
    JsonEventReader, JsonRosterRepository, VcsFactoryAdapter,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    roster_repo: JsonRosterRepository,
    event_reader: JsonEventReader,
    vcs_factory: VcsFactoryAdapter,
    chat_factory: ChatFactoryAdapter,
    composer: BlockComposerAdapter,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            roster_repo: JsonRosterRepository,
            event_reader: JsonEventReader,
            vcs_factory: VcsFactoryAdapter,
            chat_factory: ChatFactoryAdapter,
            composer: BlockComposerAdapter,
            reporter: ConsoleReporter,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 조정 유스케이스를 생성한다.
    pub fn reconcile_usecase(&self) -> ReconcileReviewUseCase<'_> {
        ReconcileReviewUseCase {
            config_repo: &self.config_repo,
            roster_repo: &self.roster_repo,
            event_reader: &self.event_reader,
            vcs_factory: &self.vcs_factory,
            chat_factory: &self.chat_factory,
            composer: &self.composer,
            reporter: &self.reporter,
        }
    }
}
