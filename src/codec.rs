//! The assembled codec: configuration, vocabulary, symbol table and the
//! compiled passes, built once and shared by reference.

use crate::core::CodecConfig;
use crate::mana::{ManaCodec, SymbolTable};
use crate::text::{TextPipeline, Vocabulary};

/// Everything extraction and encoding need, immutable after construction.
///
/// `Codec` is `Send + Sync`; share one instance across worker threads.
#[derive(Clone, Debug)]
pub struct Codec {
    config: CodecConfig,
    mana: ManaCodec,
    text: TextPipeline,
}

impl Codec {
    /// Codec over the full symbol universe.
    pub fn new(config: CodecConfig, vocab: Vocabulary) -> Self {
        Self::with_symbol_table(config, vocab, SymbolTable::default())
    }

    /// Codec restricted to a custom symbol table.
    pub fn with_symbol_table(config: CodecConfig, vocab: Vocabulary, table: SymbolTable) -> Self {
        let mana = ManaCodec::new(table, &config);
        let text = TextPipeline::new(&config, vocab);
        Self { config, mana, text }
    }

    /// Markers, separators and unary settings in effect.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Cost and embedded-cost codec.
    pub fn mana(&self) -> &ManaCodec {
        &self.mana
    }

    /// Compiled rules-text passes.
    pub fn text(&self) -> &TextPipeline {
        &self.text
    }

    /// Word lists the passes and validity rules consult.
    pub fn vocab(&self) -> &Vocabulary {
        self.text.vocab()
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(CodecConfig::default(), Vocabulary::default())
    }
}
