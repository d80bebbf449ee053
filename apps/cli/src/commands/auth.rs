use anyhow::Result;
use clap::Args;

use crate::main_lib::AppContext;

#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

pub async fn login(context: &AppContext, args: LoginArgs) -> Result<()> {
    let password = read_password(args.password)?;

    if context.client.login(&args.email, &password).await? {
        println!("Signed in as {}", args.email);
        Ok(())
    } else {
        anyhow::bail!("Login failed: check your email and password.")
    }
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Email for the new account
    #[arg(long)]
    pub email: String,

    /// Password for the new account (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

pub async fn register(context: &AppContext, args: RegisterArgs) -> Result<()> {
    let password = read_password(args.password)?;

    if context.client.register(&args.email, &password).await? {
        println!(
            "Account created for {}. Run `finfolio login` to sign in.",
            args.email
        );
        Ok(())
    } else {
        anyhow::bail!("Registration failed: the email may already be registered.")
    }
}

pub fn logout(context: &AppContext) -> Result<()> {
    context.session.logout()?;
    println!("Signed out.");
    Ok(())
}

pub fn whoami(context: &AppContext) -> Result<()> {
    match context.session.current_user() {
        Some(email) => println!("Signed in as {}", email),
        None => println!("Not signed in."),
    }
    Ok(())
}

fn read_password(provided: Option<String>) -> Result<String> {
    match provided {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}
