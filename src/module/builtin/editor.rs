//! Editor module: languages, save commands, cursor position and the
//! current-file slot

use super::declarative::{BuiltinModule, CommandSpec};
use crate::events::api::Subscription;
use crate::module::error::ModuleResult;
use crate::module::scoped_api::ModuleApi;
use crate::module::traits::Module;
use crate::module::types::ModuleInfo;
use crate::registry::api::{
    FileInfo, LanguageAssociation, StatusBarAlignment, StatusBarContribution,
};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Declarative part plus tracking of the focused file
pub struct EditorModule {
    base: BuiltinModule,
    subscriptions: Mutex<Vec<Subscription>>,
}

pub fn module() -> EditorModule {
    let base = BuiltinModule::new(
        ModuleInfo::new("editor", "Editor", "1.0.0").with_description("Code editor"),
    )
    .with_language(LanguageAssociation::new(
        "javascript",
        [".js", ".jsx", ".mjs"],
        "JavaScript",
    ))
    .with_language(LanguageAssociation::new(
        "typescript",
        [".ts", ".tsx"],
        "TypeScript",
    ))
    .with_language(LanguageAssociation::new("python", [".py", ".pyw"], "Python"))
    .with_language(LanguageAssociation::new("go", [".go"], "Go"))
    .with_command(
        CommandSpec::new("editor.save", "Save File", "editor:save").with_keybinding("Cmd+S"),
    )
    .with_command(
        CommandSpec::new("editor.saveAll", "Save All Files", "editor:save-all")
            .with_keybinding("Cmd+Shift+S"),
    )
    .with_status_item(
        StatusBarContribution::new("editor-position", "Ln 1, Col 1", StatusBarAlignment::Right)
            .with_order(100),
    );

    EditorModule {
        base,
        subscriptions: Mutex::new(Vec::new()),
    }
}

impl EditorModule {
    fn subscriptions(&self) -> MutexGuard<'_, Vec<Subscription>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl Module for EditorModule {
    fn module_info(&self) -> ModuleInfo {
        self.base.module_info()
    }

    async fn activate(&self, api: &ModuleApi) -> ModuleResult<()> {
        self.base.activate(api).await?;

        let editor = api.editor();
        let focus = editor.clone();
        let opened = editor.on_open(move |payload| {
            if let Some(path) = payload["path"].as_str() {
                focus.set_current_file(Some(FileInfo::file(path)));
            }
        });

        let focus = editor.clone();
        let closed = editor.on_close(move |payload| {
            let closed_path = payload["path"].as_str();
            let is_current = focus
                .get_current_file()
                .is_some_and(|file| Some(file.path.as_str()) == closed_path);
            if is_current {
                focus.set_current_file(None);
            }
        });

        self.subscriptions().extend([opened, closed]);
        Ok(())
    }

    async fn deactivate(&self) -> ModuleResult<()> {
        for subscription in self.subscriptions().drain(..) {
            subscription.unsubscribe();
        }
        self.base.deactivate().await
    }
}
