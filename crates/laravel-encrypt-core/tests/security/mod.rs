mod entropy_quality;
