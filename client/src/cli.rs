//! Command line definitions for `certctl`

use clap::{Args, Parser, Subcommand};
use shared::CertificateForm;

#[derive(Parser, Debug)]
#[command(name = "certctl", version, about = "Verify and administer certificates")]
pub struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify a certificate by its public ID
    Verify { certificate_id: String },

    /// Log in as an administrator and store the session
    Login {
        #[arg(long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(long, env = "CERTS_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Totals and recently added certificates
    Dashboard {
        /// How many recent certificates to show
        #[arg(long)]
        recent: Option<usize>,
    },

    /// List certificates, optionally filtered
    List {
        /// Match against ID, recipient, title or issue date
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one certificate by storage ID
    Show { storage_id: String },

    /// Create a certificate
    Add {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Replace a certificate; unspecified fields keep their stored values
    Edit {
        storage_id: String,
        #[command(flatten)]
        form: FormArgs,
    },

    /// Delete a certificate by storage ID
    Delete { storage_id: String },

    /// Show which fields apply to a certificate type
    Rules { certificate_type: String },
}

/// Certificate fields as command line flags
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Public certificate ID
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub recipient_name: Option<String>,
    /// Course name, internship title, workshop title or reason for appreciation
    #[arg(long)]
    pub title: Option<String>,
    /// internship, course, appreciation or workshop
    #[arg(long = "type")]
    pub certificate_type: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub issue_date: Option<String>,
    /// YYYY-MM-DD, required for courses
    #[arg(long)]
    pub expiry_date: Option<String>,
    #[arg(long)]
    pub instructor_name: Option<String>,
    #[arg(long)]
    pub grade: Option<String>,
    /// Comma-separated list
    #[arg(long)]
    pub skills: Option<String>,
    /// valid, expired or revoked
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub duration: Option<String>,
}

impl FormArgs {
    /// Build a fresh form; missing flags become blank fields
    pub fn into_form(self) -> CertificateForm {
        let mut form = CertificateForm::default();
        self.apply_to(&mut form);
        form
    }

    /// Overwrite only the fields given on the command line
    pub fn apply_to(self, form: &mut CertificateForm) {
        let fields = [
            (self.id, &mut form.id),
            (self.recipient_name, &mut form.recipient_name),
            (self.title, &mut form.certificate_title),
            (self.certificate_type, &mut form.certificate_type),
            (self.issue_date, &mut form.issue_date),
            (self.expiry_date, &mut form.expiry_date),
            (self.instructor_name, &mut form.instructor_name),
            (self.grade, &mut form.grade),
            (self.skills, &mut form.skills),
            (self.status, &mut form.status),
            (self.duration, &mut form.duration),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}
