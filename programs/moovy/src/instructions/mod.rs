pub mod initialize_distributor;
pub mod set_token_sale;
pub mod set_tge_passed;
pub mod distribute;
pub mod get_distributable;
pub mod initialize_sale;
pub mod start_igo;
pub mod add_participants;
pub mod buy;
pub mod claim;
pub mod get_quote;
pub mod round_views;

pub use initialize_distributor::*;
pub use set_token_sale::*;
pub use set_tge_passed::*;
pub use distribute::*;
pub use get_distributable::*;
pub use initialize_sale::*;
pub use start_igo::*;
pub use add_participants::*;
pub use buy::*;
pub use claim::*;
pub use get_quote::*;
pub use round_views::*;
