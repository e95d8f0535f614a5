//! Authentication flows.

use clap::Subcommand;

use creators_hub_storefront::AppState;
use creators_hub_storefront::hub::{Credentials, ProfileUpdate, Registration};
use creators_hub_storefront::stores::{AuthOutcome, AuthState};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Submit the emailed verification code
    Verify {
        /// Six-digit code from the verification email
        code: String,
    },
    /// Resend the verification code
    Resend,
    /// Log out and purge the stored session
    Logout {
        /// View to land on afterwards
        #[arg(long)]
        redirect: Option<String>,
    },
    /// Show the current session
    Whoami,
    /// Request a password-reset email
    Forgot {
        /// Account email
        email: String,
    },
    /// Redeem a password-reset token
    Reset {
        /// Token from the reset email
        token: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
    /// Update profile fields and/or password
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New email
        #[arg(long)]
        email: Option<String>,

        /// New password
        #[arg(long)]
        password: Option<String>,
    },
}

pub async fn run(state: &AppState, action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login { email, password } => {
            let outcome = state.session().login(Credentials { email, password }).await;
            report(state, outcome)?;
        }
        AuthAction::Register {
            name,
            email,
            password,
        } => {
            let outcome = state
                .session()
                .register(Registration {
                    name,
                    email,
                    password,
                })
                .await;
            report(state, outcome)?;
        }
        AuthAction::Verify { code } => {
            let outcome = state.session().verify_email(&code).await;
            report(state, outcome)?;
        }
        AuthAction::Resend => {
            state.session().resend_code().await?;
            println!("Verification code resent");
        }
        AuthAction::Logout { redirect } => {
            let target = state.session().logout(redirect.as_deref());
            println!("Logged out; continue at {target}");
        }
        AuthAction::Whoami => match state.session().state() {
            AuthState::Authenticated(session) => {
                println!("{} <{}>", session.name, session.email);
                println!("  id:    {}", session.user_id);
                println!("  role:  {}", session.role);
            }
            AuthState::VerificationPending { email } => {
                println!("Verification pending for {email}");
            }
            _ => println!("Not logged in"),
        },
        AuthAction::Forgot { email } => {
            state.session().forgot_password(&email).await?;
            println!("If that account exists, a reset email is on its way");
        }
        AuthAction::Reset { token, password } => {
            let outcome = state.session().reset_password(&token, &password).await;
            report(state, outcome)?;
        }
        AuthAction::Profile {
            name,
            email,
            password,
        } => {
            state
                .session()
                .update_profile(ProfileUpdate {
                    name,
                    email,
                    password,
                })
                .await?;
            println!("Profile updated");
        }
    }
    Ok(())
}

/// Print an auth outcome; failures become a nonzero exit.
fn report(state: &AppState, outcome: AuthOutcome) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        AuthOutcome::Success => {
            if let Some(session) = state.session().session() {
                println!("Welcome back, {}!", session.name);
                if session.is_admin() {
                    println!("Admin console available: hub-cli admin --help");
                }
            }
            Ok(())
        }
        AuthOutcome::VerificationRequired { email } => {
            println!("Please verify your email address.");
            println!("A code was sent to {email}; submit it with: hub-cli auth verify <code>");
            Ok(())
        }
        AuthOutcome::Failed { error } => Err(error.into()),
    }
}
