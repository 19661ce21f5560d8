use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::jobs::handler::convert,
        crate::modules::jobs::handler::extract_audio,
        crate::modules::jobs::handler::extract_video,
        crate::modules::jobs::handler::thumbnail,
        crate::modules::download::handler::download,
    ),
    components(
        schemas(
            crate::modules::jobs::dto::JobResponse,
            crate::modules::jobs::dto::ConvertForm,
            crate::modules::jobs::dto::ExtractForm,
            crate::modules::jobs::dto::ThumbnailForm,
            crate::common::response::ErrorBody,
        )
    ),
    tags(
        (name = "Jobs", description = "Media conversion jobs"),
        (name = "Download", description = "Produced artifact retrieval")
    )
)]
pub struct ApiDoc;
