//! The endpoint catalog.
//!
//! One macro invocation produces both the static table and a typed convenience
//! method on [`MistralClient`](crate::client::MistralClient) per operation, so
//! the two can never drift apart.

use super::{EndpointSpec, HttpMethod};

macro_rules! endpoints {
    ($( $method_fn:ident => $name:literal, $method:ident $path:literal, $streaming:literal; )*) => {
        pub(super) static ENDPOINTS: &[EndpointSpec] = &[
            $(
                EndpointSpec {
                    name: $name,
                    method: HttpMethod::$method,
                    path_template: $path,
                    streaming: $streaming,
                },
            )*
        ];

        impl crate::client::MistralClient {
            $(
                #[doc = concat!("Calls `", $name, "` (`", stringify!($method), " ", $path, "`).")]
                pub async fn $method_fn(
                    &self,
                    args: crate::client::CallArgs<'_>,
                ) -> crate::Result<crate::client::CallOutput> {
                    self.call($name, args).await
                }
            )*
        }
    };
}

endpoints! {
    // Completions
    create_chat_completion => "createChatCompletion", Post "/chat/completions", false;
    create_fim_completion => "createFimCompletion", Post "/fim/completions", false;
    create_agents_completion => "createAgentsCompletion", Post "/agents/completions", false;

    // Embeddings
    create_embedding => "createEmbedding", Post "/embeddings", false;

    // Moderation & classification
    create_moderation => "createModeration", Post "/moderations", false;
    create_chat_moderation => "createChatModeration", Post "/chat/moderations", false;
    create_classification => "createClassification", Post "/classifications", false;
    create_chat_classification => "createChatClassification", Post "/chat/classifications", false;

    // OCR
    create_ocr => "createOcr", Post "/ocr", false;

    // Audio
    create_audio_transcription => "createAudioTranscription", Post "/audio/transcriptions", false;
    create_audio_transcription_stream => "createAudioTranscriptionStream", Post "/audio/transcriptions", true;

    // Models
    list_models => "listModels", Get "/models", false;
    retrieve_model => "retrieveModel", Get "/models/{model_id}", false;
    delete_model => "deleteModel", Delete "/models/{model_id}", false;
    update_fine_tuned_model => "updateFineTunedModel", Patch "/fine_tuning/models/{model_id}", false;
    archive_model => "archiveModel", Post "/fine_tuning/models/{model_id}/archive", false;
    unarchive_model => "unarchiveModel", Delete "/fine_tuning/models/{model_id}/archive", false;

    // Files
    upload_file => "uploadFile", Post "/files", false;
    list_files => "listFiles", Get "/files", false;
    retrieve_file => "retrieveFile", Get "/files/{file_id}", false;
    delete_file => "deleteFile", Delete "/files/{file_id}", false;
    download_file => "downloadFile", Get "/files/{file_id}/content", false;
    get_file_signed_url => "getFileSignedUrl", Get "/files/{file_id}/url", false;

    // Fine-tuning jobs
    list_fine_tuning_jobs => "listFineTuningJobs", Get "/fine_tuning/jobs", false;
    create_fine_tuning_job => "createFineTuningJob", Post "/fine_tuning/jobs", false;
    retrieve_fine_tuning_job => "retrieveFineTuningJob", Get "/fine_tuning/jobs/{job_id}", false;
    cancel_fine_tuning_job => "cancelFineTuningJob", Post "/fine_tuning/jobs/{job_id}/cancel", false;
    start_fine_tuning_job => "startFineTuningJob", Post "/fine_tuning/jobs/{job_id}/start", false;

    // Batch jobs
    list_batch_jobs => "listBatchJobs", Get "/batch/jobs", false;
    create_batch_job => "createBatchJob", Post "/batch/jobs", false;
    retrieve_batch_job => "retrieveBatchJob", Get "/batch/jobs/{job_id}", false;
    cancel_batch_job => "cancelBatchJob", Post "/batch/jobs/{job_id}/cancel", false;

    // Conversations
    start_conversation => "startConversation", Post "/conversations", false;
    start_conversation_stream => "startConversationStream", Post "/conversations", true;
    list_conversations => "listConversations", Get "/conversations", false;
    retrieve_conversation => "retrieveConversation", Get "/conversations/{conversation_id}", false;
    append_conversation => "appendConversation", Post "/conversations/{conversation_id}", false;
    append_conversation_stream => "appendConversationStream", Post "/conversations/{conversation_id}", true;
    get_conversation_history => "getConversationHistory", Get "/conversations/{conversation_id}/history", false;
    get_conversation_messages => "getConversationMessages", Get "/conversations/{conversation_id}/messages", false;
    restart_conversation => "restartConversation", Post "/conversations/{conversation_id}/restart", false;
    restart_conversation_stream => "restartConversationStream", Post "/conversations/{conversation_id}/restart", true;
    delete_conversation => "deleteConversation", Delete "/conversations/{conversation_id}", false;

    // Agents
    create_agent => "createAgent", Post "/agents", false;
    list_agents => "listAgents", Get "/agents", false;
    retrieve_agent => "retrieveAgent", Get "/agents/{agent_id}", false;
    update_agent => "updateAgent", Patch "/agents/{agent_id}", false;
    update_agent_version => "updateAgentVersion", Patch "/agents/{agent_id}/version", false;
}
