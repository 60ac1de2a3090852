use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    srcpkg completions bash > ~/.bash_completion.d/srcpkg\n\n\
                  Generate zsh completions:\n    srcpkg completions zsh > ~/.zfunc/_srcpkg\n\n\
                  Generate fish completions:\n    srcpkg completions fish > ~/.config/fish/completions/srcpkg.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
