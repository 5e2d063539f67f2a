//! Blog content generation
//!
//! Produces blog posts via JSON-mode chat completions, plus DALL-E header
//! images and the prompts that drive them. Post generation propagates
//! errors so the admin caller can report them; the image helpers degrade
//! to safe defaults instead.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::{
    error::{AppError, AppResult},
    language::Language,
    openai::{
        ChatCompletionRequest, ChatMessage, ImageGenerationRequest, OpenAIClient, ResponseFormat,
    },
};

/// Model used for blog generation (JSON mode support)
const BLOG_MODEL: &str = "gpt-3.5-turbo-1106";
/// Model used to write image prompts
const IMAGE_PROMPT_MODEL: &str = "gpt-4";
/// DALL-E prompts longer than this are cut down
const MAX_IMAGE_PROMPT_CHARS: usize = 1000;

/// A generated blog post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogContent {
    pub title: String,
    pub content: String,
    pub meta_description: String,
}

/// Blog content generator
pub struct ContentGenerator {
    client: Arc<OpenAIClient>,
}

impl ContentGenerator {
    /// Create a new content generator
    pub fn new(client: Arc<OpenAIClient>) -> Self {
        Self { client }
    }

    /// Generate a blog post for a topic
    #[instrument(skip(self, keywords), fields(topic = %topic, language = %language))]
    pub async fn generate_blog_post(
        &self,
        topic: &str,
        keywords: &str,
        language: Language,
    ) -> AppResult<BlogContent> {
        let system_prompt = format!(
            "You are a professional blog writer for a tech company focusing on AI solutions.\n\
             Write a well-structured, informative blog post in {}.\n\
             The content should be engaging, include real-world examples, and be SEO optimized.\n\
             Format the content with proper Markdown headings, paragraphs, bullet points, \
             and highlight key concepts.\n\
             Include a compelling title that would attract clicks.\n\
             Include a meta description for SEO purposes (150-160 characters).",
            language.display_name()
        );

        let user_prompt = format!(
            "Write a comprehensive blog post about: {topic}\n\
             \n\
             Use these keywords for SEO optimization (include them naturally): {keywords}\n\
             \n\
             The blog post should:\n\
             1. Have a catchy, SEO-friendly title\n\
             2. Include an introduction that engages the reader\n\
             3. Have 3-5 main sections with headings\n\
             4. Include practical examples or case studies\n\
             5. End with a conclusion and call-to-action\n\
             6. Be between 800-1200 words\n\
             \n\
             Respond with a JSON object with the following structure:\n\
             {{\n\
                 \"title\": \"Your generated title here\",\n\
                 \"content\": \"The full blog post content in Markdown\",\n\
                 \"meta_description\": \"SEO-optimized meta description\"\n\
             }}"
        );

        let request = ChatCompletionRequest {
            model: BLOG_MODEL.to_string(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            temperature: None,
            max_tokens: None,
            response_format: Some(ResponseFormat::json_object()),
        };

        let response = self.client.chat_completion(&request).await?;

        let content = response.first_content().ok_or_else(|| {
            AppError::UpstreamError("Blog generation returned no content".to_string())
        })?;

        let blog: BlogContent = serde_json::from_str(content)?;

        info!(
            title = %blog.title,
            content_len = blog.content.len(),
            "Blog post generated"
        );
        Ok(blog)
    }

    /// Write a DALL-E prompt for a post's header image
    ///
    /// Never fails: any error yields a generic prompt built from the topic.
    #[instrument(skip(self), fields(topic = %topic))]
    pub async fn create_image_prompt(&self, blog_title: &str, topic: &str) -> String {
        let system_prompt = "You are an expert at creating detailed image generation prompts for DALL-E.\n\
             Your task is to create a detailed, descriptive prompt that will result in a professional, \
             visually appealing image relevant to a blog post.\n\
             The prompt should describe a realistic, photographic style image that would work well \
             as a blog header.\n\
             Focus on creating prompts that will generate clean, professional images without text elements.";

        let user_prompt = format!(
            "Create a detailed image generation prompt for a blog post with the title: \"{blog_title}\"\n\
             \n\
             The blog is about: {topic}\n\
             \n\
             The image should be:\n\
             - Professional and suitable for a business blog\n\
             - Visually appealing and attention-grabbing\n\
             - Related to the topic but abstract enough to be versatile\n\
             - Without any text elements\n\
             - Suitable as a header image for the blog post\n\
             \n\
             Provide only the image prompt text, nothing else."
        );

        let request = ChatCompletionRequest {
            model: IMAGE_PROMPT_MODEL.to_string(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            temperature: None,
            max_tokens: None,
            response_format: None,
        };

        match self.client.chat_completion(&request).await {
            Ok(response) => match response.first_content() {
                Some(text) => truncate_prompt(text),
                None => {
                    warn!("Image prompt generation returned no content, using generic prompt");
                    generic_image_prompt(topic)
                }
            },
            Err(e) => {
                error!(error = %e, "Error creating image prompt, using generic prompt");
                generic_image_prompt(topic)
            }
        }
    }

    /// Generate a header image, returning its URL
    ///
    /// `None` on any failure; the post is published without an image.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate_image(&self, prompt: &str) -> Option<String> {
        let request = ImageGenerationRequest::dall_e_3(prompt);

        match self.client.generate_image(&request).await {
            Ok(response) => {
                let url = response.data.into_iter().next().and_then(|image| image.url);
                if url.is_none() {
                    warn!("Image generation returned no URL");
                }
                url
            }
            Err(e) => {
                error!(error = %e, "Error generating image");
                None
            }
        }
    }
}

/// The prompt used when prompt generation itself fails
fn generic_image_prompt(topic: &str) -> String {
    format!("Professional blog header image related to {topic}")
}

/// Cap prompt length at the DALL-E limit, marking the cut with an ellipsis
fn truncate_prompt(text: &str) -> String {
    if text.chars().count() > MAX_IMAGE_PROMPT_CHARS {
        let head: String = text.chars().take(MAX_IMAGE_PROMPT_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
