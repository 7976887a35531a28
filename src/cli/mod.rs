use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server exposing POST /explain
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind (ignored with --public)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Bind to 0.0.0.0 instead of the loopback address
        #[arg(long)]
        public: bool,

        /// Restrict CORS to these origins (default: any origin)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },

    /// Explain a single word once and print the result
    Explain {
        word: String,

        /// Sentence or passage the word appears in
        context: String,
    },
}
