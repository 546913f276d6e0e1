//! Inputs shared by every format pass

use spatial_model::{GlyphTable, LayoutConfig, ScriptMode, TranslationMode, Translator};

/// Page geometry plus the translator, resolved once per format pass
#[derive(Clone, Copy)]
pub struct FormatContext<'a> {
    pub config: &'a LayoutConfig,
    pub translator: &'a dyn Translator,
}

impl<'a> FormatContext<'a> {
    pub fn new(config: &'a LayoutConfig, translator: &'a dyn Translator) -> Self {
        Self { config, translator }
    }

    pub fn cells_per_line(&self) -> usize {
        self.config.cells_per_line()
    }

    pub fn script(&self) -> ScriptMode {
        self.config.script()
    }

    pub fn glyphs(&self) -> &'static GlyphTable {
        self.config.script().glyphs()
    }

    pub fn translate(&self, mode: TranslationMode, text: &str) -> String {
        self.translator.translate(mode, text)
    }
}

impl std::fmt::Debug for FormatContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatContext")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
