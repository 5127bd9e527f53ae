//! Public API for the contribution registry

pub use crate::registry::contributions::ContributionRegistry;
pub use crate::registry::table::{Contribution, ContributionTable};
pub use crate::registry::types::{
    Command, CommandHandler, FileInfo, LanguageAssociation, PanelContribution, PanelPosition,
    SidebarContribution, StatusBarAlignment, StatusBarContribution, ViewHandle,
};
