mod basename_modal;
mod layout;
mod question_card;
mod results_modal;
mod stage_progress;
mod wallet_button;

pub use basename_modal::BasenameModal;
pub use layout::Layout;
pub use question_card::QuestionCard;
pub use results_modal::ResultsModal;
pub use stage_progress::StageProgress;
pub use wallet_button::WalletButton;
