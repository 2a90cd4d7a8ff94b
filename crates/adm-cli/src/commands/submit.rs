use adm_client::HttpReviewApi;
use adm_config::AdmConfig;
use adm_core::entities::NewApplication;

use crate::cli::{OutputFormat, SubmitArgs};
use crate::output::output;

pub async fn handle(args: SubmitArgs, config: &AdmConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut preferred = args.preferred_majors.into_iter();
    let new = NewApplication {
        university_name: args.university,
        full_name: Some(args.full_name),
        email: args.email,
        whatsapp: args.whatsapp,
        nationality: args.nationality,
        current_country: args.current_country,
        degree: args.degree,
        majors: args.major,
        china_major_1: preferred.next(),
        china_major_2: preferred.next(),
        china_major_3: preferred.next(),
        status: None,
    };

    let api = HttpReviewApi::from_config(&config.client);
    let created = api.create_application(&new).await?;
    output(&created, format)
}
